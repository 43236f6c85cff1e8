use medscan_common::config::Config;
use medscan_core::{service::VerificationService, verifier};

use crate::terminal::{panel::Presenter, print};

pub async fn verify(identifier: &str, cfg: &Config) -> anyhow::Result<()> {
    let service = VerificationService::new(verifier::from_config(cfg));
    let presenter = Presenter::new(cfg.quiet);

    service
        .verify_manual(identifier, &mut |state| presenter.show(state))
        .await;

    print::separator();
    Ok(())
}
