//! # medscan core
//!
//! The moving parts of a scan: acquiring a video source, sampling frames
//! until a QR code decodes, and asking a verifier about the identifier it
//! carries.
//!
//! * **[`camera`]**: the video source boundary and an image-sequence source.
//! * **[`decoder`]**: the QR decode boundary and its `rqrr` implementation.
//! * **[`capture`]**: the scan session state machine and frame loop.
//! * **[`verifier`]**: mock and live verification strategies.
//! * **[`service`]**: generation tracking so stale answers never reach the screen.
//! * **[`scanner`]**: ties the above into the scan and manual flows.

pub mod camera;
pub mod capture;
pub mod decoder;
pub mod error;
pub mod scanner;
pub mod service;
pub mod verifier;
