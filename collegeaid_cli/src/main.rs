mod commands;
mod output;
mod routes;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use collegeaid_lib::{AidClient, AppConfig};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "collegeaid")]
#[command(about = "Estimate college aid packages from College Scorecard data")]
struct Cli {
    /// Output format: table, json, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search schools by name fragment or state code
    Schools(commands::schools::SchoolsArgs),
    /// Estimate grants, work-study, loans and out-of-pocket cost
    Estimate(commands::estimate::EstimateArgs),
    /// Show in-state and out-of-state tuition
    Tuition(commands::lookup::LookupArgs),
    /// Show the overall acceptance rate
    Acceptance(commands::lookup::LookupArgs),
    /// Serve the JSON API over HTTP
    Serve(server::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let config = AppConfig::from_env()?;
    let client = AidClient::from_config(&config)?;

    match &cli.command {
        Commands::Schools(args) => commands::schools::run(args, &client, &format).await?,
        Commands::Estimate(args) => commands::estimate::run(args, &client, &format).await?,
        Commands::Tuition(args) => commands::lookup::run_tuition(args, &client, &format).await?,
        Commands::Acceptance(args) => {
            commands::lookup::run_acceptance(args, &client, &format).await?
        }
        Commands::Serve(args) => server::run(args, config.server.clone(), client).await?,
    }

    Ok(())
}

/// Info for this binary and the library on top of whatever `RUST_LOG` sets.
fn log_filter(base: EnvFilter) -> Result<EnvFilter> {
    Ok(base
        .add_directive("collegeaid=info".parse()?)
        .add_directive("collegeaid_lib=info".parse()?))
}
