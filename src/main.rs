mod commands;

use anyhow::Result;
use clap::Parser;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    filament_catalog_core::init_tracing();
    let cli = Cli::parse();
    commands::run(cli).await
}
