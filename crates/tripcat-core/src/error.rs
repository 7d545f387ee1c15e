// crates/tripcat-core/src/error.rs
use thiserror::Error;

/// Everything that can go wrong between the feeds and a trip submission.
///
/// The first three variants are the catalog failures. The loader downgrades
/// them to an empty catalog; the remaining variants surface to the caller.
#[derive(Debug, Error)]
pub enum TripError {
    /// A feed could not be reached or answered with a non-2xx status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A payload did not have the expected structure.
    #[error("{feed} feed has an unexpected shape at `{path}`: {message}")]
    DataShape {
        feed: &'static str,
        path: String,
        message: String,
    },

    /// No country ended up with coordinates, even after the name fallback.
    #[error("Reconciliation produced no countries with coordinates")]
    ReconciliationEmpty,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary snapshot error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No country selected")]
    NoCountrySelected,

    #[error("Country `{0}` is not in the catalog")]
    CountryNotFound(String),

    /// The document store rejected a request.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl TripError {
    /// True for the failures the loader swallows into an empty catalog.
    pub fn is_catalog_failure(&self) -> bool {
        matches!(
            self,
            TripError::Transport(_) | TripError::DataShape { .. } | TripError::ReconciliationEmpty
        )
    }
}

pub type Result<T> = std::result::Result<T, TripError>;
