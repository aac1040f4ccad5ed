use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bitgenius_demo::app;
use bitgenius_demo::config::DemoConfig;
use bitgenius_demo::shared::types::Network;

#[derive(Parser, Debug)]
#[command(version, about = "BitGenius Bitcoin agent demo: Maestro + Hiro API walkthrough with simulated trades")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Maestro API key
    #[arg(long, env = "MAESTRO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Bitcoin network (mainnet or testnet)
    #[arg(long)]
    network: Option<Network>,

    /// Stacks contract address (overrides config)
    #[arg(long)]
    contract_address: Option<String>,

    /// Stacks contract name (overrides config)
    #[arg(long)]
    contract_name: Option<String>,

    /// Addresses to inspect (comma-separated)
    #[arg(long)]
    addresses: Option<String>,

    /// Price used when the provider gives none
    #[arg(long)]
    default_price: Option<Decimal>,

    /// Pause after each address request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Transactions requested per address
    #[arg(long)]
    history_limit: Option<u32>,

    /// Also fetch the contract interface
    #[arg(long)]
    inspect_contract: bool,

    /// Print the run report as JSON when done
    #[arg(long)]
    report_json: bool,
}

impl Args {
    /// Priority: CLI args > config file > defaults
    fn into_config(self) -> Result<(DemoConfig, bool)> {
        let mut cfg = match &self.config {
            Some(path) => DemoConfig::from_file(path)?,
            None => DemoConfig::default(),
        };

        if let Some(api_key) = self.api_key {
            cfg.api_key = api_key;
        }
        if let Some(network) = self.network {
            cfg.network = network;
        }
        if let Some(contract_address) = self.contract_address {
            cfg.contract_address = contract_address;
        }
        if let Some(contract_name) = self.contract_name {
            cfg.contract_name = contract_name;
        }
        if let Some(addresses) = self.addresses {
            cfg.test_addresses = addresses
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(default_price) = self.default_price {
            cfg.default_price = default_price;
        }
        if let Some(delay_ms) = self.delay_ms {
            cfg.request_delay_ms = delay_ms;
        }
        if let Some(history_limit) = self.history_limit {
            cfg.history_limit = history_limit;
        }
        if self.inspect_contract {
            cfg.inspect_contract_interface = true;
        }

        Ok((cfg, self.report_json))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Errors past the per-step boundaries end up here and are only logged.
    if let Err(e) = run(args).await {
        error!("Error running BitGenius Bitcoin tests: {:#}", e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let (cfg, report_json) = args.into_config()?;
    let report = app::run(cfg).await?;

    if report_json {
        println!("{}", report.to_json()?);
    }
    Ok(())
}
