//! Verification strategies.
//!
//! Both strategies answer the same question through [`Verifier`], so the rest
//! of the scanner never knows whether a network was involved.

use async_trait::async_trait;

use medscan_common::config::{Config, Mode};
use medscan_common::record::VerificationOutcome;

mod live;
mod mock;

pub use live::LiveVerifier;
pub use mock::{MOCK_DELAY, MockVerifier, sample_record};

#[async_trait]
pub trait Verifier: Send + Sync {
    /// Looks up a single identifier. Never retries.
    async fn verify(&self, identifier: &str) -> VerificationOutcome;
}

/// Picks the strategy the configuration asks for.
pub fn from_config(cfg: &Config) -> Box<dyn Verifier> {
    match cfg.mode {
        Mode::Live => Box::new(LiveVerifier::new(cfg.api_url.clone())),
        Mode::Mock => Box::new(MockVerifier::new(cfg.mock_outcome)),
    }
}
