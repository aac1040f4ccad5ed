// src/app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::DemoRunner;
use crate::config::DemoConfig;
use crate::infrastructure::api_clients::{HiroClient, MaestroClient};
use crate::report::RunReport;

/// Wire the real HTTP clients into a runner and walk the sequence once.
pub async fn run(cfg: DemoConfig) -> Result<RunReport> {
    cfg.validate().context("invalid configuration")?;

    info!("Starting BitGenius demo against {} ({})", cfg.maestro_url, cfg.network);
    info!(
        "Contract: {}.{} via {}",
        cfg.contract_address, cfg.contract_name, cfg.explorer_url
    );
    if cfg.api_key.trim().is_empty() {
        warn!("⚠️ No Maestro API key configured - authenticated requests will be rejected");
    }

    let maestro = MaestroClient::new(&cfg.maestro_url, &cfg.api_key, cfg.network)
        .context("build Maestro client")?;
    let hiro = HiroClient::new(&cfg.explorer_url);

    let runner = DemoRunner::new(cfg, Arc::new(maestro), Arc::new(hiro));
    let report = runner.run().await;
    report.log_summary();

    Ok(report)
}
