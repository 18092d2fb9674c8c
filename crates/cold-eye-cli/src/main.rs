//! cold-eye: score a company under the Cold Eye rubric from the command line.
//!
//! Usage:
//!   cold-eye score --ticker KO --cagr 6 --dy 3.1 --pe 22 --margin 23 --roe 40 --cashflow profit_inflow
//!   cold-eye rubric
//!   cold-eye calc cagr --start 2.5B --end 3.4B --years 5
//!
//! Results are printed as JSON on stdout; logs go to stderr.

mod commands;
mod config;

use config::{CliConfig, LogFormat};

fn init_logging(format: LogFormat) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "cold_eye=info,analyzer_store=info".into())
    };
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CliConfig::from_env()?;
    init_logging(config.log_format);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{}", commands::USAGE);
        std::process::exit(1);
    }

    let output = commands::run(&args, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
