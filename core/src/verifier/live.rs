//! Verification over HTTP.
//!
//! One `GET {base}/api/verify/{identifier}` per lookup, answered with
//! `{ "valid": bool, "medicine": { ... } }`. Services in the wild spell a few
//! medicine fields differently, so both spellings are accepted.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use medscan_common::date::{NOT_AVAILABLE, format_date};
use medscan_common::record::{VerificationOutcome, VerificationRecord};

use super::Verifier;
use crate::error::TransportError;

pub struct LiveVerifier {
    base_url: String,
    agent: ureq::Agent,
}

impl LiveVerifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Builds the lookup URL, percent-encoding `identifier` as a single path
    /// segment.
    pub fn endpoint(&self, identifier: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| TransportError::InvalidUrl(format!("{}: {err}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "verify", identifier]);

        Ok(url)
    }
}

#[async_trait]
impl Verifier for LiveVerifier {
    async fn verify(&self, identifier: &str) -> VerificationOutcome {
        let url: Url = match self.endpoint(identifier) {
            Ok(url) => url,
            Err(err) => {
                error!("Verification error: {err}");
                return VerificationOutcome::TransportError(err.to_string());
            }
        };

        debug!(%url, "querying verification service");
        let agent = self.agent.clone();
        let fetched = tokio::task::spawn_blocking(move || fetch(&agent, &url)).await;

        let result: Result<VerificationOutcome, TransportError> = match fetched {
            Ok(Ok(Fetched::Body(body))) => parse_outcome(&body, identifier),
            Ok(Ok(Fetched::Status(code))) => {
                info!(code, "Service does not know {identifier}");
                Ok(VerificationOutcome::NotFound)
            }
            Ok(Err(err)) => Err(err),
            Err(join_err) => Err(TransportError::Unreachable(join_err.to_string())),
        };

        result.unwrap_or_else(|err| {
            error!("Verification error: {err}");
            VerificationOutcome::TransportError(err.to_string())
        })
    }
}

enum Fetched {
    Body(String),
    Status(u16),
}

fn fetch(agent: &ureq::Agent, url: &Url) -> Result<Fetched, TransportError> {
    match agent.get(url.as_str()).call() {
        Ok(response) if (200..300).contains(&response.status()) => {
            Ok(Fetched::Body(response.into_string()?))
        }
        Ok(response) => Ok(Fetched::Status(response.status())),
        Err(ureq::Error::Status(code, _)) => Ok(Fetched::Status(code)),
        Err(ureq::Error::Transport(transport)) => {
            Err(TransportError::Unreachable(transport.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    medicine: Option<MedicinePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MedicinePayload {
    name: Option<Value>,
    medicine_name: Option<Value>,
    batch_number: Option<Value>,
    manufacturer: Option<Value>,
    manufacturer_name: Option<Value>,
    mfg_date: Option<Value>,
    expiry_date: Option<Value>,
}

impl MedicinePayload {
    fn into_record(self, identifier: &str) -> VerificationRecord {
        VerificationRecord {
            name: first_text([&self.name, &self.medicine_name]),
            batch_number: first_text([&self.batch_number]),
            manufacturer: first_text([&self.manufacturer, &self.manufacturer_name]),
            manufacture_date: format_date(self.mfg_date.as_ref()),
            expiry_date: format_date(self.expiry_date.as_ref()),
            identifier: identifier.to_string(),
        }
    }
}

/// Maps a 2xx response body to an outcome.
fn parse_outcome(body: &str, identifier: &str) -> Result<VerificationOutcome, TransportError> {
    let response: VerifyResponse =
        serde_json::from_str(body).map_err(|err| TransportError::Malformed(err.to_string()))?;

    if !response.valid.unwrap_or(false) {
        info!("Fake/unregistered medicine detected: {identifier}");
        return Ok(VerificationOutcome::NotFound);
    }

    let medicine = response.medicine.ok_or_else(|| {
        TransportError::Malformed("`valid` is true but `medicine` is missing".to_string())
    })?;

    let record = medicine.into_record(identifier);
    info!("Authentic medicine verified: {}", record.name);
    Ok(VerificationOutcome::Authentic(record))
}

/// First non-empty value rendered as text, or `N/A`.
fn first_text<const N: usize>(candidates: [&Option<Value>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
