use anyhow::Result;
use clap::Args;
use collegeaid_lib::AidClient;

use crate::output::{print_schools, OutputFormat};

#[derive(Args)]
pub struct SchoolsArgs {
    /// Name fragment, or a two-letter state code (e.g. GA, MD)
    #[arg(long)]
    pub q: Option<String>,

    /// Results per page
    #[arg(long)]
    pub per_page: Option<u32>,
}

pub async fn run(args: &SchoolsArgs, client: &AidClient, format: &OutputFormat) -> Result<()> {
    let page = client
        .search_schools(args.q.as_deref(), args.per_page)
        .await?;

    if let Some(total) = page["metadata"]["total"].as_i64() {
        eprintln!("{} matching schools", total);
    }

    print_schools(&page, format);
    Ok(())
}
