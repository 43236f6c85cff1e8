//! Orchestrates a complete scan: capture, extraction, verification.
//!
//! [`MedicineScanner`] only knows the [`Camera`], [`QrDecoder`] and
//! [`Verifier`] abstractions. Every view transition is handed to the
//! caller's `present` callback as it happens, so the caller decides how the
//! panels are drawn.

use tracing::debug;

use medscan_common::view::{ErrorOrigin, ViewState};

use crate::camera::Camera;
use crate::capture::{LoopOptions, ScanExit, ScanSession, StopSignal};
use crate::decoder::QrDecoder;
use crate::error::CaptureError;
use crate::service::VerificationService;
use crate::verifier::Verifier;

pub struct MedicineScanner {
    camera: Box<dyn Camera>,
    decoder: Box<dyn QrDecoder>,
    service: VerificationService,
    options: LoopOptions,
}

impl MedicineScanner {
    pub fn new(
        camera: Box<dyn Camera>,
        decoder: Box<dyn QrDecoder>,
        verifier: Box<dyn Verifier>,
        options: LoopOptions,
    ) -> Self {
        Self {
            camera,
            decoder,
            service: VerificationService::new(verifier),
            options,
        }
    }

    pub fn service(&self) -> &VerificationService {
        &self.service
    }

    /// Runs one scan on `session` and verifies whatever it decodes.
    ///
    /// Returns the final view state, or `None` when a newer verification
    /// superseded this one.
    pub async fn scan(
        &self,
        session: &mut ScanSession,
        stop: &dyn StopSignal,
        present: &mut (dyn FnMut(&ViewState) + Send),
    ) -> Result<Option<ViewState>, CaptureError> {
        self.service.invalidate();
        present(&ViewState::Scanner);

        match session.start(self.camera.as_ref()) {
            Ok(()) => {}
            Err(CaptureError::Camera(_)) => {
                let state = ViewState::Error(ErrorOrigin::CameraAccess);
                present(&state);
                return Ok(Some(state));
            }
            Err(err) => return Err(err),
        }

        match session.run(self.decoder.as_ref(), stop, self.options).await {
            ScanExit::Decoded(payload) => Ok(self.service.verify_payload(&payload, present).await),
            ScanExit::Stopped => {
                debug!("scan ended without a QR code");
                Ok(Some(ViewState::Scanner))
            }
        }
    }
}
