use thiserror::Error;

/// Fatal errors raised while validating and expanding filament definitions.
///
/// Every variant aborts the whole compilation; no partial catalog is written.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("{manufacturer}: missing required field `{field}`")]
    MissingRequiredField { manufacturer: String, field: String },

    #[error("Filament {name} by {manufacturer} {reason}")]
    InvalidColorSpec {
        manufacturer: String,
        name: String,
        reason: String,
    },

    #[error("{manufacturer}: unknown spool type {value:?}")]
    UnknownSpoolType { manufacturer: String, value: String },

    #[error("{manufacturer}: invalid value {value:?} for `{field}`")]
    InvalidAttribute {
        manufacturer: String,
        field: String,
        value: String,
    },

    #[error("Found {} non-unique filament ids: {}", .0.len(), .0.join(", "))]
    DuplicateIds(Vec<String>),
}

impl CatalogError {
    pub(crate) fn missing(manufacturer: &str, field: impl Into<String>) -> Self {
        CatalogError::MissingRequiredField {
            manufacturer: manufacturer.to_string(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(
        manufacturer: &str,
        field: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        CatalogError::InvalidAttribute {
            manufacturer: manufacturer.to_string(),
            field: field.into(),
            value: value.to_string(),
        }
    }
}
