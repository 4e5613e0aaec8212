use anyhow::Context;
use clap::Parser;
use colored::*;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use rust_email_oracle::candidates;
use rust_email_oracle::cli::Args;
use rust_email_oracle::config::ProbeConfig;
use rust_email_oracle::enumerator::Enumerator;
use rust_email_oracle::oracle::OracleClient;
use rust_email_oracle::reporting::ConsoleReporter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Wrong arity prints usage and exits with status 2 before anything else runs.
    let args = Args::parse();

    let config = ProbeConfig::from_args(&args)?;
    let stream = candidates::candidate_stream(PathBuf::from(&args.email_file)).await?;
    let client = OracleClient::new(config).context("Failed to build HTTP client")?;

    println!("{} {}", "Target:".cyan().bold(), client.config().target);
    info!(
        "Probing with function={} timeout={:?} referer={}",
        client.config().function,
        client.config().timeout,
        client.config().referer
    );

    let mut reporter = ConsoleReporter;
    let report = Enumerator::new(&client, &mut reporter).run(stream).await;

    info!(
        "{} of {} candidates classified valid",
        report.valid.len(),
        report.classified()
    );

    Ok(())
}
