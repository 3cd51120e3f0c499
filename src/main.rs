//! Jackpot Verify CLI
//!
//! Verifies a jackpot round from its published audit record.
//! Exits with 0 when every check passes and 1 otherwise.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jackpot_verify::{
    report, verify_round, OutputFormat, ReportConfig, RoundRecord, VERSION,
};

#[derive(Parser)]
#[command(
    name = "jackpot-verify",
    version,
    about = "Verify a provably fair jackpot round",
    after_help = "To get verification data, POST {\"round_id\": \"your_round_id\"} to /api/jackpot/verify"
)]
struct Cli {
    /// Path to a verification JSON file, or the JSON itself
    input: String,

    /// Output format: text or json [env: JACKPOT_VERIFY_FORMAT]
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Currency label for amounts [env: JACKPOT_VERIFY_CURRENCY]
    #[arg(long)]
    currency: Option<String>,

    /// Print full addresses in the range table
    #[arg(long)]
    full_addresses: bool,

    /// Log filter, e.g. "debug" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Environment config with command line overrides applied.
    fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::from_env();
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
        if self.full_addresses {
            config.shorten_addresses = false;
        }
        config
    }
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("Invalid log filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    debug!("Jackpot Verify v{}", VERSION);

    let config = cli.report_config();
    let record = RoundRecord::load(&cli.input)?;
    let verification = verify_round(&record);

    let rendered = report::render(&record, &verification, &config)
        .context("Failed to render report")?;
    println!("{}", rendered.trim_end());

    Ok(verification.passed)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level.as_deref()) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
