use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use medscan_common::config::MockOutcome;
use medscan_common::date::format_date_str;
use medscan_common::record::{VerificationOutcome, VerificationRecord};

use super::Verifier;

/// Simulated network latency.
pub const MOCK_DELAY: Duration = Duration::from_millis(2_000);

/// Answers every lookup with the same canned result after [`MOCK_DELAY`].
pub struct MockVerifier {
    outcome: MockOutcome,
    delay: Duration,
}

impl MockVerifier {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            delay: MOCK_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// The record the mock vouches for. Echoes `identifier`.
pub fn sample_record(identifier: &str) -> VerificationRecord {
    VerificationRecord {
        name: "Paracetamol".to_string(),
        batch_number: "BATCH001".to_string(),
        manufacturer: "PharmaCorp India".to_string(),
        manufacture_date: format_date_str("2024-01-15"),
        expiry_date: format_date_str("2026-01-15"),
        identifier: identifier.to_string(),
    }
}

#[async_trait]
impl Verifier for MockVerifier {
    async fn verify(&self, identifier: &str) -> VerificationOutcome {
        debug!(identifier, outcome = %self.outcome, "mock verification");
        tokio::time::sleep(self.delay).await;

        match self.outcome {
            MockOutcome::Authentic => VerificationOutcome::Authentic(sample_record(identifier)),
            MockOutcome::Fake => VerificationOutcome::NotFound,
        }
    }
}
