use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use catalog::{CatalogService, HttpCatalogSource};
use chrono::TimeDelta;
use kv::{FileBackedStorage, Storage};
use tokio::sync::RwLock;

use crate::config::AppConfig;

pub type SharedState = Arc<AppState>;
pub type SharedStore = Arc<RwLock<Box<dyn Storage>>>;

pub struct AppState {
    pub store: SharedStore,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(store: Box<dyn Storage>, catalog: CatalogService) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            catalog,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let storage = FileBackedStorage::new(&cfg.data_path)
            .with_context(|| format!("Failed to open data file {}", cfg.data_path))?;

        let mut client = reqwest::Client::builder();
        if let Some(secs) = cfg.catalog_http_timeout_secs {
            client = client.timeout(Duration::from_secs(secs));
        }
        let client = client.build().context("Failed to build HTTP client")?;

        let source = HttpCatalogSource::with_client(cfg.catalog_base_url.clone(), client);
        let catalog = CatalogService::with_system_clock(Arc::new(source))
            .with_ttl(TimeDelta::seconds(cfg.catalog_cache_ttl_secs));

        Ok(Self::new(Box::new(storage), catalog))
    }
}
