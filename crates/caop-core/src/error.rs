// crates/caop-core/src/error.rs

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CaopError>;

/// Errors produced while loading and reconciling the source datasets.
///
/// The reconciliation never attempts partial success: any one failing
/// record aborts the whole run and carries the offending record's
/// context back to the caller. Expected cross-source gaps (a contact
/// record with no matching detail record, a geometry feature with no
/// attribute counterpart) are not errors and are skipped silently.
#[derive(Debug, Error)]
pub enum CaopError {
    /// A compound display name did not match the `"name (municipality)"` shape.
    #[error("{dataset}: entity name {value:?} does not match \"name (municipality)\"")]
    Parse { dataset: String, value: String },

    /// A geometry feature is missing its attribute map or a required attribute.
    #[error("geometry feature: {0}")]
    Lookup(String),

    /// A source document's expected top-level path is absent or not an array.
    #[error("{dataset}: expected a record array at top-level path {path:?}")]
    SourceFormat { dataset: String, path: String },

    /// An input file could not be located.
    #[error("{0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot cache (de)serialization failure.
    #[error("cache error: {0}")]
    Cache(#[from] bincode::Error),
}
