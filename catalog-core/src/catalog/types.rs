use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// A number as authored in a source file.
///
/// Integers are written back as integers (`1000`) and decimals keep their
/// decimal form (`210.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Number);

impl Quantity {
    /// `None` for NaN and infinities, which JSON cannot hold.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }
}

impl From<Number> for Quantity {
    fn from(number: Number) -> Self {
        Self(number)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(Number::from(value))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Nozzle or bed temperature in °C.
pub type Temperature = Quantity;

/// Inclusive `[low, high]` temperature range in °C.
pub type TemperatureRange = [Temperature; 2];

/// Price list in the order the source file lists it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prices(Vec<(Currency, Quantity)>);

impl Prices {
    pub fn get(&self, currency: Currency) -> Option<&Quantity> {
        self.0
            .iter()
            .find(|(code, _)| *code == currency)
            .map(|(_, amount)| amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Currency, Quantity)> {
        self.0.iter()
    }
}

impl From<Vec<(Currency, Quantity)>> for Prices {
    fn from(entries: Vec<(Currency, Quantity)>) -> Self {
        Self(entries)
    }
}

impl Serialize for Prices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(code, amount)| (code, amount)))
    }
}

impl<'de> Deserialize<'de> for Prices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PricesVisitor;

        impl<'de> Visitor<'de> for PricesVisitor {
            type Value = Prices;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of currency codes to prices")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Prices, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Prices(entries))
            }
        }

        deserializer.deserialize_map(PricesVisitor)
    }
}

/// Physical spool the filament is wound on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoolType {
    Plastic,
    Cardboard,
    Metal,
    /// Refill without a spool.
    #[serde(rename = "none")]
    NoSpool,
}

impl SpoolType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "plastic" => Some(Self::Plastic),
            "cardboard" => Some(Self::Cardboard),
            "metal" => Some(Self::Metal),
            "none" => Some(Self::NoSpool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Cardboard => "cardboard",
            Self::Metal => "metal",
            Self::NoSpool => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    Matte,
    Glossy,
}

impl Finish {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "matte" => Some(Self::Matte),
            "glossy" => Some(Self::Glossy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matte => "matte",
            Self::Glossy => "glossy",
        }
    }
}

/// How the colours of a multi-colour strand are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiColorDirection {
    /// Layered cross-section, every colour visible around the strand.
    Coaxial,
    /// Colours change along the length of the strand.
    Longitudinal,
}

impl MultiColorDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "coaxial" => Some(Self::Coaxial),
            "longitudinal" => Some(Self::Longitudinal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coaxial => "coaxial",
            Self::Longitudinal => "longitudinal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Marble,
    Sparkle,
}

impl Pattern {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "marble" => Some(Self::Marble),
            "sparkle" => Some(Self::Sparkle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marble => "marble",
            Self::Sparkle => "sparkle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    AUD,
    CAD,
    JPY,
    KRW,
}

impl Currency {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            "AUD" => Some(Self::AUD),
            "CAD" => Some(Self::CAD),
            "JPY" => Some(Self::JPY),
            "KRW" => Some(Self::KRW),
            _ => None,
        }
    }
}

/// Appearance attributes shared by a filament and its colours.
///
/// At filament level these are the defaults; at colour level every `None`
/// means "inherit from the filament".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppearanceAttributes {
    pub finish: Option<Finish>,
    pub multi_color_direction: Option<MultiColorDirection>,
    pub pattern: Option<Pattern>,
    pub translucent: Option<bool>,
    pub glow: Option<bool>,
}

/// Effective appearance of one colour after inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    pub finish: Option<Finish>,
    pub multi_color_direction: Option<MultiColorDirection>,
    pub pattern: Option<Pattern>,
    pub translucent: bool,
    pub glow: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightSpec {
    /// Net filament weight in grams.
    pub weight: Quantity,
    pub spool_weight: Option<Quantity>,
    pub spool_type: Option<SpoolType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpec {
    pub name: String,
    pub hex: Option<String>,
    pub hexes: Option<Vec<String>>,
    pub overrides: AppearanceAttributes,
}

/// One hand-authored product line, before expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct FilamentDefinition {
    /// Name template, `{color_name}` is replaced per colour.
    pub name: String,
    pub material: String,
    /// g/cm³
    pub density: Quantity,
    pub prices: Option<Prices>,
    pub weights: Vec<WeightSpec>,
    /// mm
    pub diameters: Vec<Quantity>,
    pub colors: Vec<ColorSpec>,
    pub extruder_temp: Option<Temperature>,
    pub extruder_temp_range: Option<TemperatureRange>,
    pub bed_temp: Option<Temperature>,
    pub bed_temp_range: Option<TemperatureRange>,
    pub defaults: AppearanceAttributes,
}

/// A validated manufacturer source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturerFile {
    pub manufacturer: String,
    pub filaments: Vec<FilamentDefinition>,
}

/// One concrete catalog row: filament × weight × diameter × colour.
///
/// Field order is the serialized order of the compiled catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRow {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub material: String,
    pub prices: Option<Prices>,
    pub density: Quantity,
    pub weight: Quantity,
    pub spool_weight: Option<Quantity>,
    pub spool_type: Option<SpoolType>,
    pub diameter: Quantity,
    pub color_hex: Option<String>,
    pub color_hexes: Option<Vec<String>>,
    pub extruder_temp: Option<Temperature>,
    pub extruder_temp_range: Option<TemperatureRange>,
    pub bed_temp: Option<Temperature>,
    pub bed_temp_range: Option<TemperatureRange>,
    pub finish: Option<Finish>,
    pub multi_color_direction: Option<MultiColorDirection>,
    pub pattern: Option<Pattern>,
    pub translucent: bool,
    pub glow: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spool_type_parse_round_trip() {
        for value in ["plastic", "cardboard", "metal", "none"] {
            let spool = SpoolType::parse(value).unwrap();
            assert_eq!(spool.as_str(), value);
        }
        assert_eq!(SpoolType::parse("Plastic"), None);
        assert_eq!(SpoolType::parse("wood"), None);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&SpoolType::NoSpool).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&MultiColorDirection::Longitudinal).unwrap(),
            "\"longitudinal\""
        );
        assert_eq!(serde_json::to_string(&Finish::Matte).unwrap(), "\"matte\"");
    }

    #[test]
    fn test_prices_keep_source_order() {
        let json = r#"{"GBP":19.99,"USD":24}"#;
        let prices: Prices = serde_json::from_str(json).unwrap();
        let codes: Vec<Currency> = prices.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes, vec![Currency::GBP, Currency::USD]);
        assert_eq!(prices.get(Currency::USD).map(Quantity::value), Some(24.0));
        assert_eq!(prices.get(Currency::EUR), None);
        assert_eq!(serde_json::to_string(&prices).unwrap(), json);
    }

    #[test]
    fn test_quantity_keeps_authored_form() {
        for json in ["1000", "210.0", "1.75", "212.5"] {
            let quantity: Quantity = serde_json::from_str(json).unwrap();
            assert_eq!(serde_json::to_string(&quantity).unwrap(), json);
        }

        let whole: Quantity = serde_json::from_str("210").unwrap();
        let decimal: Quantity = serde_json::from_str("210.0").unwrap();
        assert_eq!(whole.value(), decimal.value());
        assert_eq!(Quantity::from(250).to_string(), "250");
        assert_eq!(Quantity::from_f64(f64::NAN), None);
    }
}
