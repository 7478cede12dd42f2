use thiserror::Error;

use crate::FetchError;

/// Every fetch failure ends up here. Callers get one user-facing message; the
/// underlying cause stays available through `source()` for logs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not load the list of cars. Check your internet connection.")]
    Unavailable(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
