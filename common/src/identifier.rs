//! # Identifier Extraction
//!
//! A QR payload is either a bare identifier (`0x7a8f9b2c...`), a link carrying
//! it as an `id` query parameter, or free text with the identifier embedded
//! somewhere. [`extract_identifier`] tries those shapes in that order.

use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

use crate::view::ErrorOrigin;

const HEX_PREFIX: &str = "0x";
const ID_PARAM: &str = "id";

static EMBEDDED_HEX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[a-fA-F0-9]+").expect("static regex is valid"));

/// Maps a decoded QR payload to an identifier.
///
/// Rules, first match wins:
/// 1. Payload starts with `0x`: returned unchanged.
/// 2. Payload contains `id=`: the text after the first `?` is read as a query
///    string and its `id` value returned. No `?` or no `id` key yields `None`.
/// 3. First `0x` + hex digits run anywhere in the payload.
/// 4. The payload unchanged.
pub fn extract_identifier(payload: &str) -> Option<String> {
    if payload.starts_with(HEX_PREFIX) {
        return Some(payload.to_string());
    }

    if payload.contains("id=") {
        return query_id(payload);
    }

    if let Some(found) = EMBEDDED_HEX_ID.find(payload) {
        return Some(found.as_str().to_string());
    }

    Some(payload.to_string())
}

fn query_id(payload: &str) -> Option<String> {
    let (_, rest) = payload.split_once('?')?;
    let query: &str = rest.split('?').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Resolves a scanned payload into something worth sending to the verifier.
pub fn resolve_payload(payload: &str) -> Result<String, ErrorOrigin> {
    extract_identifier(payload)
        .filter(|id| !id.is_empty())
        .ok_or(ErrorOrigin::NoIdentifier)
}

/// Trims a typed-in identifier, rejecting blank input.
pub fn resolve_manual(input: &str) -> Result<String, ErrorOrigin> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ErrorOrigin::EmptyInput);
    }
    Ok(trimmed.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
