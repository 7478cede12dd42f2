//! Car brand/model catalog
//!
//! Fetches the remote catalog once, keeps it for a day and answers picker
//! lookups and searches from that snapshot.

mod cache;
mod clock;
mod error;
mod schema;
mod service;
mod source;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CatalogError, Result};
pub use schema::{CarBrand, CarModel, CatalogMeta, CatalogResponse};
pub use service::{
    CatalogService, ALL_CARS_KEY, DEFAULT_TTL_SECS, PICKER_DEFAULT_LIMIT, PICKER_MIN_QUERY,
};
pub use source::{CatalogSource, FetchError, HttpCatalogSource, SourceInfo, DEFAULT_BASE_URL};
