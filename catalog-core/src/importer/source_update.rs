use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use super::swatch::ColorSwatch;

/// A manufacturer source file held as raw JSON.
///
/// Wraps the `Map<String, Value>` (insertion ordered) so that fields this
/// tool does not know about, and their order, survive a rewrite.
pub struct SourceDocument {
    data: Map<String, Value>,
}

impl SourceDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    /// Serialize with 4-space indentation and a trailing newline.
    /// Non-ASCII text is written as UTF-8, not escaped.
    pub fn to_json_4space(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.data.serialize(&mut ser)?;
        let mut s = String::from_utf8(buf)?;
        if !s.ends_with('\n') {
            s.push('\n');
        }
        Ok(s)
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.data.get("manufacturer")?.as_str()
    }

    /// Name templates of every filament, in file order.
    pub fn filament_names(&self) -> Vec<&str> {
        self.data
            .get("filaments")
            .and_then(Value::as_array)
            .map(|filaments| {
                filaments
                    .iter()
                    .filter_map(|f| f.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace the `colors` of the first filament named exactly `name`.
    ///
    /// Returns `false` (and changes nothing) when no filament matches.
    pub fn update_filament_colors(&mut self, name: &str, colors: &[ColorSwatch]) -> Result<bool> {
        let Some(filaments) = self.data.get_mut("filaments").and_then(Value::as_array_mut) else {
            return Ok(false);
        };

        let target = filaments
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|filament| filament.get("name").and_then(Value::as_str) == Some(name));

        match target {
            Some(filament) => {
                filament.insert("colors".to_string(), serde_json::to_value(colors)?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// Read a source file, replace one filament's colours and write it back.
///
/// The write is atomic. When `name` matches no filament the file is left
/// untouched and `Ok(false)` is returned.
pub fn update_source_file(path: &Path, name: &str, colors: &[ColorSwatch]) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    let mut document = SourceDocument::from_json(&content)
        .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

    if !document.update_filament_colors(name, colors)? {
        warn!(
            "No filament named {:?} in {:?} ({}), file left unchanged. Known filaments: {:?}",
            name,
            path,
            document.manufacturer().unwrap_or("unknown manufacturer"),
            document.filament_names()
        );
        return Ok(false);
    }

    write_document_atomic(&document, path)?;
    info!("Updated {} colours of {:?} in {:?}", colors.len(), name, path);
    Ok(true)
}

/// Same atomic-write pattern as the catalog writer: temp file, then rename.
fn write_document_atomic(document: &SourceDocument, target_path: &Path) -> Result<()> {
    let json = document.to_json_4space()?;

    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.flush()?;
    temp.persist(target_path)
        .with_context(|| format!("Failed to write {:?}", target_path))?;
    Ok(())
}
