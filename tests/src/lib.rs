//! Cross-crate tests: the live client against a local HTTP server and whole
//! scans over recorded frames.

#[cfg(test)]
mod live_verifier;
#[cfg(test)]
mod scan_flow;
