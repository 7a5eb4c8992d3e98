//! Interactive listing browser.

mod app;
mod fetch;
mod ui;

use anyhow::Result;
use clap::Args;
use jobscan_remotive::CATEGORIES;

#[derive(Args)]
pub struct BrowseArgs {
    /// Keyword to pre-fill the search input with
    pub keyword: Option<String>,

    /// Category slug to start in (see `jobscan search --list-categories`)
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn execute(args: BrowseArgs) -> Result<()> {
    let category_index = match args.category.as_deref() {
        None => 0,
        Some(slug) => CATEGORIES
            .iter()
            .position(|c| c.slug == slug)
            .ok_or_else(|| anyhow::anyhow!("Unknown category '{slug}'"))?,
    };

    app::run(args.keyword.unwrap_or_default(), category_index)
}
