use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use filament_catalog_core::catalog;
use filament_catalog_core::importer::{self, config, http_client::ImportHttpClient};

/// Compile per-manufacturer filament definitions into one catalog.
#[derive(Parser)]
#[clap(name = "filament-catalog", version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand every source file and write the sorted catalog
    Compile {
        /// Directory holding one JSON file per manufacturer
        #[clap(long, default_value = "filaments")]
        input: PathBuf,
        /// Compiled catalog output file
        #[clap(long, default_value = "filaments.json")]
        output: PathBuf,
    },
    /// Expand and validate every source file without writing anything
    Check {
        /// Directory holding one JSON file per manufacturer
        #[clap(long, default_value = "filaments")]
        input: PathBuf,
    },
    /// Copy vendor colour swatches into manufacturer source files
    ImportColors {
        /// TOML file listing import targets (defaults to the built-in list)
        #[clap(long)]
        targets: Option<PathBuf>,
        /// Fetch and parse only, leave source files untouched
        #[clap(long)]
        dry_run: bool,
    },
}

/// Dispatch a parsed command line. Errors propagate to `main`, which exits non-zero.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compile { input, output } => compile(&input, &output),
        Commands::Check { input } => check(&input),
        Commands::ImportColors { targets, dry_run } => import_colors(targets, dry_run).await,
    }
}

fn compile(input: &Path, output: &Path) -> Result<()> {
    info!("Compiling all filaments...");
    let count = catalog::compile_to_file(input, output)?;
    println!("Compiled {} filaments into {}", count, output.display());
    Ok(())
}

fn check(input: &Path) -> Result<()> {
    let rows = catalog::compile_directory(input)?;
    println!("{} filaments OK", rows.len());
    Ok(())
}

async fn import_colors(targets: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = match targets {
        Some(path) => config::load_targets(&path)?,
        None => config::default_targets(),
    };
    let client = ImportHttpClient::new().map_err(anyhow::Error::msg)?;

    let reports = importer::import_colors(&config.targets, &client, dry_run).await?;
    for report in &reports {
        if report.updated {
            println!("Updated {} ({} colours)", report.name, report.colors);
        } else {
            println!("Skipped {} ({} colours)", report.name, report.colors);
        }
    }
    Ok(())
}
