//! # View Model
//!
//! The scanner shows one panel at a time. Instead of toggling panels one by
//! one, callers describe *where* the flow is with a [`ViewState`] and let
//! [`render`] decide what is visible.

use crate::record::{VerificationOutcome, VerificationRecord};

/// The five mutually exclusive regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Scanner,
    Loading,
    Authentic,
    Fake,
    Error,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Scanner,
        Panel::Loading,
        Panel::Authentic,
        Panel::Fake,
        Panel::Error,
    ];
}

/// Where a failure came from. Decides the message on the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    CameraAccess,
    VerificationService,
    EmptyInput,
    NoIdentifier,
}

impl ErrorOrigin {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorOrigin::CameraAccess => "Cannot access camera. Please allow camera permissions.",
            ErrorOrigin::VerificationService => {
                "Cannot reach the verification service. Please check your internet connection."
            }
            ErrorOrigin::EmptyInput => "Please enter an identifier.",
            ErrorOrigin::NoIdentifier => "The scanned QR code does not contain an identifier.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for a QR code (or a typed-in identifier).
    Scanner,
    /// A verification is in flight.
    Loading { identifier: String },
    /// A verification finished.
    Outcome(VerificationOutcome),
    /// The attempt failed before a verification could finish.
    Error(ErrorOrigin),
}

impl From<VerificationOutcome> for ViewState {
    fn from(outcome: VerificationOutcome) -> Self {
        ViewState::Outcome(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// What is on screen after a transition: one visible panel and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    panel: Panel,
    message: String,
    fields: Vec<Field>,
}

impl Screen {
    fn new(panel: Panel, message: impl Into<String>) -> Self {
        Self {
            panel,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panel == panel
    }

    /// Visibility of every panel, in [`Panel::ALL`] order.
    pub fn visibility(&self) -> [(Panel, bool); 5] {
        Panel::ALL.map(|panel| (panel, self.is_visible(panel)))
    }
}

pub fn render(state: &ViewState) -> Screen {
    match state {
        ViewState::Scanner => Screen::new(Panel::Scanner, "Point the camera at the QR code on the package"),
        ViewState::Loading { identifier } => {
            Screen::new(Panel::Loading, format!("Verifying {identifier}"))
        }
        ViewState::Outcome(VerificationOutcome::Authentic(record)) => {
            Screen::new(Panel::Authentic, "Authentic medicine").with_fields(record_fields(record))
        }
        ViewState::Outcome(VerificationOutcome::NotFound) => Screen::new(
            Panel::Fake,
            "This medicine is not registered. It may be counterfeit.",
        ),
        ViewState::Outcome(VerificationOutcome::TransportError(_)) => Screen::new(
            Panel::Error,
            ErrorOrigin::VerificationService.message(),
        ),
        ViewState::Error(origin) => Screen::new(Panel::Error, origin.message()),
    }
}

fn record_fields(record: &VerificationRecord) -> Vec<Field> {
    let field = |label: &'static str, value: &String| Field {
        label,
        value: value.clone(),
    };

    vec![
        field("Medicine", &record.name),
        field("Batch", &record.batch_number),
        field("Manufacturer", &record.manufacturer),
        field("Mfg Date", &record.manufacture_date),
        field("Expiry", &record.expiry_date),
        field("Identifier", &record.identifier),
    ]
}
