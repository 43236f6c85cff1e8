/// The details of a medicine the verification service vouched for.
///
/// Every field is already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecord {
    pub name: String,
    pub batch_number: String,
    pub manufacturer: String,
    pub manufacture_date: String,
    pub expiry_date: String,
    pub identifier: String,
}

/// Result of a single verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The identifier belongs to a registered medicine.
    Authentic(VerificationRecord),
    /// The service answered, but does not know the identifier.
    NotFound,
    /// The service could not be reached or sent something unreadable.
    TransportError(String),
}

impl VerificationOutcome {
    pub fn is_authentic(&self) -> bool {
        matches!(self, VerificationOutcome::Authentic(_))
    }
}
