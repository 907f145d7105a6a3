//! Error types for catalog construction and configuration.

use thiserror::Error;

use crate::core::builder::Attribute;

/// Result type for catalog construction
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Defects in a catalog script. All of them are fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("body `{body}` closed without required attribute `{attribute}`")]
    MissingAttribute { body: String, attribute: Attribute },

    #[error("body `{body}` has invalid {attribute}: {value}")]
    InvalidAttribute {
        body: String,
        attribute: Attribute,
        value: f64,
    },

    #[error("`{attribute}` set outside of any body")]
    OutsideBody { attribute: Attribute },

    #[error("body `{body}` nested at depth {depth}, maximum is {max}")]
    TooDeep { body: String, depth: usize, max: usize },

    #[error("end() without a matching begin")]
    UnbalancedEnd,

    #[error("body `{body}` was never closed")]
    Unclosed { body: String },

    #[error("star `{body}` must be the root body")]
    StarNotRoot { body: String },

    #[error("orbiting body `{body}` declared without a parent")]
    OrbitingRoot { body: String },

    #[error("second root body `{body}`")]
    MultipleRoots { body: String },

    #[error("catalog script declared no bodies")]
    Empty,

    #[error(
        "counting pass saw {counted_bodies} bodies ({counted_name_bytes} name bytes), \
         materializing pass saw {built_bodies} ({built_name_bytes})"
    )]
    PassMismatch {
        counted_bodies: u32,
        counted_name_bytes: usize,
        built_bodies: u32,
        built_name_bytes: usize,
    },
}

/// Errors loading an [`OrreryConfig`](crate::config::OrreryConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value {field} = {value}")]
    Invalid { field: &'static str, value: f64 },
}
