use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::types::ManufacturerFile;
use super::validation::{validate_manufacturer, ManufacturerSource};

/// Read and validate one manufacturer source file.
pub fn read_manufacturer_file(path: &Path) -> Result<ManufacturerFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    let source: ManufacturerSource = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
    let file = validate_manufacturer(source).with_context(|| format!("Invalid {:?}", path))?;

    debug!(
        "Read {} filament definitions for {} from {:?}",
        file.filaments.len(),
        file.manufacturer,
        path
    );

    Ok(file)
}

/// List the `*.json` files directly inside `dir`, sorted by file name.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Filament source directory not found: {:?}", dir);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

/// Load every manufacturer file in `dir`, in file-name order.
pub fn load_manufacturer_files(dir: &Path) -> Result<Vec<ManufacturerFile>> {
    let mut files = Vec::new();
    for path in source_files(dir)? {
        info!("Compiling {:?}", path);
        files.push(read_manufacturer_file(&path)?);
    }
    info!("Loaded {} manufacturer files from {:?}", files.len(), dir);
    Ok(files)
}
