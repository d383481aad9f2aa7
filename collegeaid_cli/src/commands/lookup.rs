use anyhow::Result;
use clap::Args;
use collegeaid_lib::{AidClient, SchoolLookup};

use crate::output::{print_acceptance, print_tuition, OutputFormat};

#[derive(Args)]
pub struct LookupArgs {
    /// School ID (UNITID)
    #[arg(long)]
    pub id: Option<String>,

    /// Exact school name, used when no ID is given
    #[arg(long)]
    pub name: Option<String>,
}

impl LookupArgs {
    fn lookup(&self) -> Result<SchoolLookup> {
        Ok(SchoolLookup::from_parts(
            self.id.as_deref(),
            self.name.as_deref(),
        )?)
    }
}

pub async fn run_tuition(args: &LookupArgs, client: &AidClient, format: &OutputFormat) -> Result<()> {
    let tuition = client.tuition(&args.lookup()?).await?;
    print_tuition(&tuition, format);
    Ok(())
}

pub async fn run_acceptance(
    args: &LookupArgs,
    client: &AidClient,
    format: &OutputFormat,
) -> Result<()> {
    let acceptance = client.acceptance(&args.lookup()?).await?;
    print_acceptance(&acceptance, format);
    Ok(())
}
