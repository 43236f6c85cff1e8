//! Guards the screen against stale verification answers.
//!
//! A lookup can still be in flight when the user starts over. Every lookup
//! takes a ticket from a generation counter; an answer whose ticket is no
//! longer the newest is dropped instead of rendered.
//!
//! The service also runs the identifier-to-outcome half of the flow, which
//! both the camera scan and manual entry share.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use medscan_common::identifier;
use medscan_common::record::VerificationOutcome;
use medscan_common::view::ViewState;

use crate::verifier::Verifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct VerificationService {
    verifier: Box<dyn Verifier>,
    generation: AtomicU64,
}

impl VerificationService {
    pub fn new(verifier: Box<dyn Verifier>) -> Self {
        Self {
            verifier,
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new generation, superseding every outstanding ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersedes outstanding lookups without starting a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Verifies `identifier`, returning `None` if a newer lookup began while
    /// this one was in flight.
    pub async fn verify(&self, identifier: &str) -> Option<VerificationOutcome> {
        let ticket: Ticket = self.begin();
        let outcome: VerificationOutcome = self.verifier.verify(identifier).await;

        if self.is_current(ticket) {
            Some(outcome)
        } else {
            debug!(identifier, "discarding stale verification result");
            None
        }
    }

    /// Verifies a decoded QR payload, presenting every view transition.
    ///
    /// Returns the final view state, or `None` when a newer lookup
    /// superseded this one.
    pub async fn verify_payload(
        &self,
        payload: &str,
        present: &mut (dyn FnMut(&ViewState) + Send),
    ) -> Option<ViewState> {
        match identifier::resolve_payload(payload) {
            Ok(id) => self.verify_identifier(&id, present).await,
            Err(origin) => Some(finish(ViewState::Error(origin), present)),
        }
    }

    /// Verifies an identifier typed in by hand, see [`Self::verify_payload`].
    pub async fn verify_manual(
        &self,
        input: &str,
        present: &mut (dyn FnMut(&ViewState) + Send),
    ) -> Option<ViewState> {
        match identifier::resolve_manual(input) {
            Ok(id) => self.verify_identifier(&id, present).await,
            Err(origin) => Some(finish(ViewState::Error(origin), present)),
        }
    }

    async fn verify_identifier(
        &self,
        id: &str,
        present: &mut (dyn FnMut(&ViewState) + Send),
    ) -> Option<ViewState> {
        info!("Verifying medicine: {id}");
        present(&ViewState::Loading {
            identifier: id.to_string(),
        });

        let outcome = self.verify(id).await?;
        Some(finish(ViewState::Outcome(outcome), present))
    }
}

fn finish(state: ViewState, present: &mut (dyn FnMut(&ViewState) + Send)) -> ViewState {
    present(&state);
    state
}
