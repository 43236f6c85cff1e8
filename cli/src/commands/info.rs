use colored::*;

use medscan_common::config::{Config, Mode};
use medscan_core::verifier::{LiveVerifier, MOCK_DELAY};

use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn info(cfg: &Config) {
    print::set_key_width(["Version", "Mode", "API URL", "Endpoint", "FPS", "Mock outcome"]);

    print::aligned_line("Version", env!("CARGO_PKG_VERSION"));
    print::aligned_line("Mode", mode_label(cfg.mode));
    print::aligned_line("API URL", cfg.api_url.as_str());
    print::aligned_line("Endpoint", endpoint_pattern(cfg));
    print::aligned_line("FPS", cfg.fps.to_string());

    if cfg.mode == Mode::Mock {
        print::aligned_line("Mock outcome", cfg.mock_outcome.to_string());
        print::as_tree_one_level(&mock_details());
    }
    print::separator();
}

fn mode_label(mode: Mode) -> ColoredString {
    match mode {
        Mode::Live => "live".color(colors::AUTHENTIC),
        Mode::Mock => "mock".color(colors::ACCENT),
    }
}

fn endpoint_pattern(cfg: &Config) -> ColoredString {
    match LiveVerifier::new(cfg.api_url.clone()).endpoint("{id}") {
        Ok(url) => url.to_string().replace("%7Bid%7D", "{id}").normal(),
        Err(err) => err.to_string().color(colors::ERROR),
    }
}

fn mock_details() -> Vec<Detail> {
    vec![
        ("Delay".to_string(), format!("{}ms", MOCK_DELAY.as_millis()).normal()),
        ("Network".to_string(), "never contacted".normal()),
    ]
}
