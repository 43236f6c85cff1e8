use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use medscan_common::{
    config::Config,
    view::{Panel, ViewState, render},
};
use medscan_core::{
    camera::ImageSequenceCamera,
    capture::{LoopOptions, ScanSession},
    decoder::RqrrDecoder,
    scanner::MedicineScanner,
    verifier,
};

use crate::terminal::{input::InputHandle, panel::Presenter, print};

pub async fn scan(source: PathBuf, again: bool, cfg: &Config) -> anyhow::Result<()> {
    info!("Mode: {}, API: {}", cfg.mode, cfg.api_url);

    let scanner = MedicineScanner::new(
        Box::new(ImageSequenceCamera::new(source)),
        Box::new(RqrrDecoder),
        verifier::from_config(cfg),
        LoopOptions::from(cfg),
    );
    let presenter = Presenter::new(cfg.quiet);
    let mut session = ScanSession::new();

    loop {
        let input = InputHandle::start();
        let last: Option<ViewState> = scanner
            .scan(&mut session, &input, &mut |state| presenter.show(state))
            .await
            .context("scan could not start")?;

        let interrupted: bool = input.should_interrupt();
        drop(input);

        if !should_rescan(again, interrupted, last.as_ref()) {
            break;
        }
        info!("Scanning again");
    }

    print::separator();
    Ok(())
}

/// Only a verified outcome leads back to the scanner. Errors end the run so
/// the user decides when to retry.
fn should_rescan(again: bool, interrupted: bool, last: Option<&ViewState>) -> bool {
    if !again || interrupted {
        return false;
    }

    match last.map(|state| render(state).panel()) {
        Some(Panel::Authentic | Panel::Fake) => true,
        Some(Panel::Error) => {
            debug!("not rescanning after an error");
            false
        }
        Some(Panel::Scanner | Panel::Loading) | None => false,
    }
}
