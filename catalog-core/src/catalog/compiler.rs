use std::collections::HashSet;

use tracing::{info, warn};

use super::expander::expand;
use super::types::{CompiledRow, FilamentDefinition, ManufacturerFile};
use crate::error::CatalogError;

/// Expand, validate and sort every definition into the compiled catalog.
///
/// Definitions are expanded in input order. Any invalid colour or duplicate id
/// aborts the whole compilation. The result is stably sorted by
/// `(manufacturer, material, name)`, so rows with equal keys keep their
/// expansion order.
pub fn compile<'a, I>(definitions: I) -> Result<Vec<CompiledRow>, CatalogError>
where
    I: IntoIterator<Item = (&'a str, &'a FilamentDefinition)>,
{
    let mut rows = Vec::new();
    for (manufacturer, filament) in definitions {
        rows.extend(expand(manufacturer, filament)?);
    }

    let duplicates = find_duplicate_ids(&rows);
    if !duplicates.is_empty() {
        for id in &duplicates {
            warn!("Non-unique filament id: {}", id);
        }
        return Err(CatalogError::DuplicateIds(duplicates));
    }

    sort_catalog(&mut rows);
    info!("Compiled {} catalog rows", rows.len());
    Ok(rows)
}

/// Compile a set of validated manufacturer files, in the order given.
pub fn compile_files(files: &[ManufacturerFile]) -> Result<Vec<CompiledRow>, CatalogError> {
    compile(files.iter().flat_map(|file| {
        file.filaments
            .iter()
            .map(move |filament| (file.manufacturer.as_str(), filament))
    }))
}

/// Ids of every row whose id was already used by an earlier row.
///
/// An id seen `n` times is reported `n - 1` times, in emission order.
pub fn find_duplicate_ids(rows: &[CompiledRow]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());
    let mut duplicates = Vec::new();
    for row in rows {
        if !seen.insert(row.id.as_str()) {
            duplicates.push(row.id.clone());
        }
    }
    duplicates
}

/// Stable ordinal sort by `(manufacturer, material, name)`.
pub fn sort_catalog(rows: &mut [CompiledRow]) {
    rows.sort_by(|a, b| {
        (&a.manufacturer, &a.material, &a.name).cmp(&(&b.manufacturer, &b.material, &b.name))
    });
}
