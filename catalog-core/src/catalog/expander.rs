use tracing::debug;

use super::id::generate_id;
use super::inheritance::resolve_color_attributes;
use super::types::{ColorSpec, CompiledRow, FilamentDefinition, ResolvedAttributes};
use crate::error::CatalogError;

/// Placeholder in a filament name template that receives the colour name.
pub const COLOR_NAME_PLACEHOLDER: &str = "{color_name}";

/// Substitute the colour name into a filament name template.
///
/// Every `{color_name}` token is replaced; all other text, including other
/// braces, is kept literally.
pub fn format_name(template: &str, color_name: &str) -> String {
    template.replace(COLOR_NAME_PLACEHOLDER, color_name)
}

/// Expand one filament definition into concrete catalog rows.
///
/// Rows are emitted weights-major, then diameters, then colours, each in
/// source order, so the result holds `weights × diameters × colors` rows.
/// The first invalid colour aborts the expansion.
pub fn expand(
    manufacturer: &str,
    filament: &FilamentDefinition,
) -> Result<Vec<CompiledRow>, CatalogError> {
    let capacity = filament.weights.len() * filament.diameters.len() * filament.colors.len();
    let mut rows = Vec::with_capacity(capacity);

    for weight in &filament.weights {
        for diameter in &filament.diameters {
            for color in &filament.colors {
                let name = format_name(&filament.name, &color.name);
                let attributes = resolve_color_attributes(&filament.defaults, &color.overrides);
                check_color(manufacturer, &name, color, &attributes)?;

                rows.push(CompiledRow {
                    id: generate_id(
                        manufacturer,
                        &name,
                        &filament.material,
                        weight.weight.value(),
                        diameter.value(),
                        weight.spool_type,
                    ),
                    manufacturer: manufacturer.to_string(),
                    name,
                    material: filament.material.clone(),
                    prices: filament.prices.clone(),
                    density: filament.density.clone(),
                    weight: weight.weight.clone(),
                    spool_weight: weight.spool_weight.clone(),
                    spool_type: weight.spool_type,
                    diameter: diameter.clone(),
                    color_hex: color.hex.clone(),
                    color_hexes: color.hexes.clone(),
                    extruder_temp: filament.extruder_temp.clone(),
                    extruder_temp_range: filament.extruder_temp_range.clone(),
                    bed_temp: filament.bed_temp.clone(),
                    bed_temp_range: filament.bed_temp_range.clone(),
                    finish: attributes.finish,
                    multi_color_direction: attributes.multi_color_direction,
                    pattern: attributes.pattern,
                    translucent: attributes.translucent,
                    glow: attributes.glow,
                });
            }
        }
    }

    debug!(
        "Expanded {:?} by {} into {} rows",
        filament.name,
        manufacturer,
        rows.len()
    );
    Ok(rows)
}

/// Check the hex/hexes/direction combination of one resolved colour.
fn check_color(
    manufacturer: &str,
    name: &str,
    color: &ColorSpec,
    attributes: &ResolvedAttributes,
) -> Result<(), CatalogError> {
    let fail = |reason: String| -> Result<(), CatalogError> {
        Err(CatalogError::InvalidColorSpec {
            manufacturer: manufacturer.to_string(),
            name: name.to_string(),
            reason,
        })
    };

    match (&color.hex, &color.hexes) {
        (None, None) => return fail("has no hex or hexes specified.".to_string()),
        (Some(_), Some(_)) => return fail("has both hex and hexes specified.".to_string()),
        _ => {}
    }

    match (attributes.multi_color_direction, &color.hexes) {
        (Some(_), None) => {
            return fail(
                "has no hexes specified but multi_color_direction is set.".to_string(),
            )
        }
        (None, Some(_)) => {
            return fail(
                "has hexes specified but no multi_color_direction is set.".to_string(),
            )
        }
        _ => {}
    }

    if let Some(hex) = &color.hex {
        if !is_hex_color(hex) {
            return fail(format!("has malformed hex {:?}.", hex));
        }
    }

    if let Some(hexes) = &color.hexes {
        if hexes.len() < 2 {
            return fail(format!("has {} hexes, at least 2 are required.", hexes.len()));
        }
        if let Some(bad) = hexes.iter().find(|hex| !is_hex_color(hex)) {
            return fail(format!("has malformed hex {:?} in hexes.", bad));
        }
    }

    Ok(())
}

/// Six hexadecimal digits, no leading `#`.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}
