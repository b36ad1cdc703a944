//! tx-sign: Ethereum transaction encoder and signer

use clap::Parser;
use signer_telemetry::{init_logging, service_span, TelemetryConfig};
use tx_sign::{default_service, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_env();
    if let Err(e) = init_logging(&telemetry) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    let _service = service_span(&telemetry).entered();

    let service = default_service()?;
    let report = run(&service, &cli.command)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}
