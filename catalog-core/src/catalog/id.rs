use super::types::SpoolType;

/// Single-character id suffix for a spool type. Absent and `none` share `n`.
pub fn spool_code(spool_type: Option<SpoolType>) -> char {
    match spool_type {
        None | Some(SpoolType::NoSpool) => 'n',
        Some(SpoolType::Plastic) => 'p',
        Some(SpoolType::Cardboard) => 'c',
        Some(SpoolType::Metal) => 'm',
    }
}

/// Build the catalog id for one expanded row.
///
/// Non-ASCII characters are dropped from `name` (not transliterated). The
/// weight is printed without decimals and the diameter with two decimals and
/// the point removed; both round half to even. The result is lower-cased and
/// all spaces are removed, e.g. `acme_pla_filamentred_1000_175_n`.
pub fn generate_id(
    manufacturer: &str,
    name: &str,
    material: &str,
    weight: f64,
    diameter: f64,
    spool_type: Option<SpoolType>,
) -> String {
    let ascii_name: String = name.chars().filter(char::is_ascii).collect();
    let weight_s = format!("{:.0}", weight);
    let diameter_s = format!("{:.2}", diameter).replace('.', "");

    format!(
        "{}_{}_{}_{}_{}_{}",
        manufacturer,
        material,
        ascii_name,
        weight_s,
        diameter_s,
        spool_code(spool_type)
    )
    .to_lowercase()
    .replace(' ', "")
}
