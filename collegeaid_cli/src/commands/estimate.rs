use anyhow::Result;
use clap::Args;
use collegeaid_lib::validation;
use collegeaid_lib::AidClient;

use crate::output::{print_estimate, OutputFormat};

#[derive(Args)]
pub struct EstimateArgs {
    /// School ID (UNITID), as shown by `collegeaid schools`
    #[arg(long)]
    pub school_id: String,

    /// Annual household income in dollars
    #[arg(long)]
    pub income: String,
}

pub async fn run(args: &EstimateArgs, client: &AidClient, format: &OutputFormat) -> Result<()> {
    let school_id = validation::parse_school_id(&args.school_id)?;
    let income = validation::parse_income(&args.income)?;
    let estimate = client.estimate(school_id, income).await?;
    print_estimate(&estimate, format);
    Ok(())
}
