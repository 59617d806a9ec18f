pub mod config;
pub mod http_client;
pub mod source_update;
pub mod swatch;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use self::config::ImportTarget;
use self::http_client::ImportHttpClient;
use self::source_update::update_source_file;
use self::swatch::parse_swatches;

/// Outcome of importing one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub name: String,
    pub colors: usize,
    /// Whether the source file was rewritten.
    pub updated: bool,
}

/// Import vendor colours for every target, one at a time.
///
/// Any fetch or write failure aborts the remaining targets.
pub async fn import_colors(
    targets: &[ImportTarget],
    client: &ImportHttpClient,
    dry_run: bool,
) -> Result<Vec<ImportReport>> {
    let mut reports = Vec::with_capacity(targets.len());

    for target in targets {
        let html = client.fetch_page(&target.url).await.map_err(|e| anyhow!(e))?;
        reports.push(import_page(target, &html, dry_run)?);
    }

    Ok(reports)
}

/// Apply an already fetched product page to the target's source file.
///
/// The source file is left untouched on a dry run and when the page has no
/// colour swatches.
pub fn import_page(target: &ImportTarget, html: &str, dry_run: bool) -> Result<ImportReport> {
    let colors = parse_swatches(html).map_err(|e| anyhow!(e))?;
    info!("Found {} colours for {:?}", colors.len(), target.name);

    let updated = if colors.is_empty() {
        warn!("No colour swatches found on {}", target.url);
        false
    } else if dry_run {
        info!("Dry run, {:?} not rewritten", target.source);
        false
    } else {
        update_source_file(&target.source, &target.name, &colors)?
    };

    Ok(ImportReport {
        name: target.name.clone(),
        colors: colors.len(),
        updated,
    })
}
