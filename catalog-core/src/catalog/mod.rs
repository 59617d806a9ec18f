pub mod types;
pub mod validation;
pub mod id;
pub mod inheritance;
pub mod expander;
pub mod compiler;
pub mod reader;
pub mod writer;

pub use compiler::{compile, compile_files};
pub use expander::expand;
pub use id::generate_id;
pub use inheritance::resolve_color_attributes;
pub use types::{
    AppearanceAttributes, ColorSpec, CompiledRow, FilamentDefinition, ManufacturerFile, Prices,
    Quantity, ResolvedAttributes, SpoolType, WeightSpec,
};

use anyhow::Result;
use std::path::Path;

/// Load every source file in `input_dir` and compile the catalog in memory.
pub fn compile_directory(input_dir: &Path) -> Result<Vec<CompiledRow>> {
    let files = reader::load_manufacturer_files(input_dir)?;
    Ok(compile_files(&files)?)
}

/// Full run: load, compile and atomically write the catalog.
///
/// Nothing is written unless compilation succeeds.
pub fn compile_to_file(input_dir: &Path, output_path: &Path) -> Result<usize> {
    let rows = compile_directory(input_dir)?;
    writer::write_catalog_atomic(&rows, output_path)?;
    Ok(rows.len())
}
