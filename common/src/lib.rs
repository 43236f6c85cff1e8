//! Shared models for `medscan`.
//!
//! Everything in here is pure: no IO, no clocks, no network. The core crate
//! drives these types, the CLI only draws them.

pub mod config;
pub mod date;
pub mod error;
pub mod identifier;
pub mod record;
pub mod view;
