//! WikiHarvest CLI: structured record extraction from MediaWiki pages.
//!
//! Fetches raw wikitext over the MediaWiki Action API, parses it into
//! typed nodes, and emits biographical and roster records as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
