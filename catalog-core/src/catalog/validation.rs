//! Decoding of hand-authored manufacturer files into validated definitions.
//!
//! Source documents are read into permissive `*Source` structs first (every
//! field optional, enums as plain strings, unknown keys ignored) so that a
//! missing or malformed field can be reported with its full path instead of
//! a bare deserializer message.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::types::{
    AppearanceAttributes, ColorSpec, Currency, FilamentDefinition, Finish, ManufacturerFile,
    MultiColorDirection, Pattern, Prices, Quantity, SpoolType, Temperature, TemperatureRange,
    WeightSpec,
};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManufacturerSource {
    pub manufacturer: Option<String>,
    pub filaments: Option<Vec<FilamentSource>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilamentSource {
    pub name: Option<String>,
    pub material: Option<String>,
    pub density: Option<Quantity>,
    /// Kept as a raw ordered map so unknown codes and non-numeric prices
    /// surface as `InvalidAttribute`.
    pub prices: Option<Map<String, Value>>,
    pub weights: Option<Vec<WeightSource>>,
    pub diameters: Option<Vec<Quantity>>,
    pub colors: Option<Vec<ColorSource>>,
    pub extruder_temp: Option<Temperature>,
    pub extruder_temp_range: Option<TemperatureRange>,
    pub bed_temp: Option<Temperature>,
    pub bed_temp_range: Option<TemperatureRange>,
    #[serde(flatten)]
    pub appearance: AppearanceSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightSource {
    pub weight: Option<Quantity>,
    pub spool_weight: Option<Quantity>,
    pub spool_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorSource {
    pub name: Option<String>,
    pub hex: Option<String>,
    pub hexes: Option<Vec<String>>,
    #[serde(flatten)]
    pub appearance: AppearanceSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppearanceSource {
    pub finish: Option<String>,
    pub multi_color_direction: Option<String>,
    pub pattern: Option<String>,
    pub translucent: Option<bool>,
    pub glow: Option<bool>,
}

/// Validate a decoded manufacturer document.
pub fn validate_manufacturer(source: ManufacturerSource) -> Result<ManufacturerFile, CatalogError> {
    let manufacturer = source
        .manufacturer
        .ok_or_else(|| CatalogError::missing("<unknown manufacturer>", "manufacturer"))?;
    if manufacturer.trim().is_empty() {
        return Err(CatalogError::invalid("<unknown manufacturer>", "manufacturer", ""));
    }

    let filaments = source
        .filaments
        .ok_or_else(|| CatalogError::missing(&manufacturer, "filaments"))?
        .into_iter()
        .enumerate()
        .map(|(index, filament)| {
            validate_filament(&manufacturer, &format!("filaments[{}]", index), filament)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ManufacturerFile {
        manufacturer,
        filaments,
    })
}

/// Validate one filament definition. `path` prefixes field names in errors.
pub fn validate_filament(
    manufacturer: &str,
    path: &str,
    source: FilamentSource,
) -> Result<FilamentDefinition, CatalogError> {
    let field = |name: &str| format!("{}.{}", path, name);

    let name = required_text(manufacturer, &field("name"), source.name)?;
    let material = required_text(manufacturer, &field("material"), source.material)?;

    let density = source
        .density
        .ok_or_else(|| CatalogError::missing(manufacturer, field("density")))?;
    positive(manufacturer, &field("density"), &density)?;

    let prices = source
        .prices
        .map(|prices| validate_prices(manufacturer, &field("prices"), prices))
        .transpose()?;

    let weights = non_empty(manufacturer, &field("weights"), source.weights)?
        .into_iter()
        .enumerate()
        .map(|(index, weight)| {
            validate_weight(manufacturer, &format!("{}[{}]", field("weights"), index), weight)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let diameters = non_empty(manufacturer, &field("diameters"), source.diameters)?;
    for (index, diameter) in diameters.iter().enumerate() {
        positive(
            manufacturer,
            &format!("{}[{}]", field("diameters"), index),
            diameter,
        )?;
    }

    let colors = non_empty(manufacturer, &field("colors"), source.colors)?
        .into_iter()
        .enumerate()
        .map(|(index, color)| {
            validate_color(manufacturer, &format!("{}[{}]", field("colors"), index), color)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let defaults = validate_appearance(manufacturer, path, source.appearance)?;

    Ok(FilamentDefinition {
        name,
        material,
        density,
        prices,
        weights,
        diameters,
        colors,
        extruder_temp: source.extruder_temp,
        extruder_temp_range: source.extruder_temp_range,
        bed_temp: source.bed_temp,
        bed_temp_range: source.bed_temp_range,
        defaults,
    })
}

fn validate_weight(
    manufacturer: &str,
    path: &str,
    source: WeightSource,
) -> Result<WeightSpec, CatalogError> {
    let weight_field = format!("{}.weight", path);
    let weight = source
        .weight
        .ok_or_else(|| CatalogError::missing(manufacturer, &weight_field))?;
    positive(manufacturer, &weight_field, &weight)?;

    let spool_type = source
        .spool_type
        .map(|value| {
            SpoolType::parse(&value).ok_or_else(|| CatalogError::UnknownSpoolType {
                manufacturer: manufacturer.to_string(),
                value,
            })
        })
        .transpose()?;

    Ok(WeightSpec {
        weight,
        spool_weight: source.spool_weight,
        spool_type,
    })
}

fn validate_color(
    manufacturer: &str,
    path: &str,
    source: ColorSource,
) -> Result<ColorSpec, CatalogError> {
    let name = source
        .name
        .ok_or_else(|| CatalogError::missing(manufacturer, format!("{}.name", path)))?;
    let overrides = validate_appearance(manufacturer, path, source.appearance)?;

    Ok(ColorSpec {
        name,
        hex: source.hex,
        hexes: source.hexes,
        overrides,
    })
}

fn validate_appearance(
    manufacturer: &str,
    path: &str,
    source: AppearanceSource,
) -> Result<AppearanceAttributes, CatalogError> {
    Ok(AppearanceAttributes {
        finish: parse_enum(manufacturer, path, "finish", source.finish, Finish::parse)?,
        multi_color_direction: parse_enum(
            manufacturer,
            path,
            "multi_color_direction",
            source.multi_color_direction,
            MultiColorDirection::parse,
        )?,
        pattern: parse_enum(manufacturer, path, "pattern", source.pattern, Pattern::parse)?,
        translucent: source.translucent,
        glow: source.glow,
    })
}

fn validate_prices(
    manufacturer: &str,
    path: &str,
    source: Map<String, Value>,
) -> Result<Prices, CatalogError> {
    let mut prices = Vec::with_capacity(source.len());
    for (code, amount) in source {
        let field = format!("{}.{}", path, code);
        let currency = Currency::parse(&code)
            .ok_or_else(|| CatalogError::invalid(manufacturer, path, &code))?;
        let amount = match amount {
            Value::Number(number) => Quantity::from(number),
            other => return Err(CatalogError::invalid(manufacturer, &field, other)),
        };
        positive(manufacturer, &field, &amount)?;
        prices.push((currency, amount));
    }
    Ok(Prices::from(prices))
}

fn parse_enum<T>(
    manufacturer: &str,
    path: &str,
    name: &str,
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, CatalogError> {
    match value {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or_else(|| CatalogError::invalid(manufacturer, format!("{}.{}", path, name), value)),
    }
}

fn required_text(
    manufacturer: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, CatalogError> {
    let value = value.ok_or_else(|| CatalogError::missing(manufacturer, field))?;
    if value.trim().is_empty() {
        return Err(CatalogError::invalid(manufacturer, field, value));
    }
    Ok(value)
}

fn non_empty<T>(
    manufacturer: &str,
    field: &str,
    value: Option<Vec<T>>,
) -> Result<Vec<T>, CatalogError> {
    let value = value.ok_or_else(|| CatalogError::missing(manufacturer, field))?;
    if value.is_empty() {
        return Err(CatalogError::invalid(manufacturer, field, "[]"));
    }
    Ok(value)
}

fn positive(manufacturer: &str, field: &str, value: &Quantity) -> Result<(), CatalogError> {
    let amount = value.value();
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::invalid(manufacturer, field, value))
    }
}
