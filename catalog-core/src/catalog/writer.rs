use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use super::types::CompiledRow;

/// Serialize the compiled catalog as a 2-space indented JSON array.
pub fn catalog_to_json(rows: &[CompiledRow]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(rows)?;
    json.push('\n');
    Ok(json)
}

/// Write the compiled catalog to disk atomically.
///
/// The JSON is written to a temporary file next to `target_path` and then
/// renamed over it, so an interrupted run never leaves a partial catalog.
pub fn write_catalog_atomic(rows: &[CompiledRow], target_path: &Path) -> Result<()> {
    let json = catalog_to_json(rows)?;

    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {:?}", parent))?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.flush()?;
    temp.persist(target_path)
        .with_context(|| format!("Failed to write {:?}", target_path))?;

    info!("Wrote {} filaments to {:?}", rows.len(), target_path);
    Ok(())
}
