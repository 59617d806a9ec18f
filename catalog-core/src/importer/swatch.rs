//! Colour swatch extraction from vendor product pages.
//!
//! Shopify-style product pages render one radio input per colour variant:
//! `<input class="color-swatch__radio" value="Charcoal (⌗2E2E2E)">`. The
//! value carries the colour name and, usually, its hex code.

use scraper::{Html, Selector};
use serde::Serialize;

/// Hex used when a swatch label carries no colour code.
pub const FALLBACK_HEX: &str = "ffffff";

const SWATCH_SELECTOR: &str = ".color-swatch__radio";

/// One colour scraped from a product page, shaped like a source `colors` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSwatch {
    pub name: String,
    pub hex: String,
}

/// Split a swatch label such as `"Fossil Grey (⌗8A8D8F)"` into name and hex.
///
/// The name is the text before the first `(`, trimmed. The hex is up to six
/// characters following the first `#` (or `⌗`), lower-cased.
pub fn split_swatch_label(raw: &str) -> ColorSwatch {
    let label = raw.replace('⌗', "#");

    let name = label
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let hex = match label.find('#') {
        Some(idx) => label[idx + 1..]
            .chars()
            .take(6)
            .collect::<String>()
            .to_lowercase(),
        None => FALLBACK_HEX.to_string(),
    };

    ColorSwatch { name, hex }
}

/// Raw `value` attributes of every swatch radio, in document order.
pub fn swatch_labels(html: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(SWATCH_SELECTOR)
        .map_err(|e| format!("Invalid swatch selector: {:?}", e))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("value"))
        .map(|value| value.to_string())
        .collect())
}

/// Parse every colour swatch on a product page.
pub fn parse_swatches(html: &str) -> Result<Vec<ColorSwatch>, String> {
    Ok(swatch_labels(html)?
        .iter()
        .map(|label| split_swatch_label(label))
        .collect())
}
