use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{CarBrand, CatalogResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.cars-base.ru";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("invalid catalog body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub base_url: String,
}

/// Where the full brand/model catalog comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_full(&self) -> Result<Vec<CarBrand>, FetchError>;
    fn info(&self) -> SourceInfo;
}

pub struct HttpCatalogSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_full(&self) -> Result<Vec<CarBrand>, FetchError> {
        let url = format!("{}/full", self.base_url.trim_end_matches('/'));
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let parsed: CatalogResponse = serde_json::from_slice(&body)?;
        debug!(
            url = %url,
            brands = parsed.data.len(),
            total = ?parsed.meta.total,
            duration_ms = ?parsed.meta.duration_ms,
            "catalog: fetched"
        );
        Ok(parsed.data)
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            name: "http".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}
