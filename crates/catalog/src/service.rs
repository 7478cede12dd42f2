use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{info, warn};

use crate::{
    CarBrand, CarModel, CatalogError, CatalogSource, Clock, Result, SystemClock, TtlCache,
};

/// Cache key of the one and only catalog entry.
pub const ALL_CARS_KEY: &str = "all_cars";
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Pickers search only from this many characters on.
pub const PICKER_MIN_QUERY: usize = 2;
/// Brands shown by the picker before the user starts searching.
pub const PICKER_DEFAULT_LIMIT: usize = 50;

pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    cache: TtlCache<Arc<Vec<CarBrand>>>,
    ttl: TimeDelta,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TtlCache::new(clock),
            ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
        }
    }

    pub fn with_system_clock(source: Arc<dyn CatalogSource>) -> Self {
        Self::new(source, Arc::new(SystemClock))
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    /// Full catalog with models, from cache when fresh.
    pub async fn get_all_cars(&self) -> Result<Arc<Vec<CarBrand>>> {
        let source = self.source.clone();
        self.cache
            .get_or_populate(ALL_CARS_KEY, self.ttl, || async move {
                match source.fetch_full().await {
                    Ok(brands) => {
                        info!(brands = brands.len(), "catalog: refreshed");
                        Ok(Arc::new(brands))
                    }
                    Err(e) => {
                        warn!(error = %e, "catalog: fetch failed");
                        Err(CatalogError::from(e))
                    }
                }
            })
            .await
    }

    /// Brands with their model lists emptied.
    pub async fn get_brands(&self) -> Result<Vec<CarBrand>> {
        let all = self.get_all_cars().await?;
        Ok(all.iter().map(CarBrand::without_models).collect())
    }

    /// Models of one brand; an unknown id gives an empty list.
    pub async fn get_models_by_brand(&self, brand_id: &str) -> Result<Vec<CarModel>> {
        let all = self.get_all_cars().await?;
        Ok(all
            .iter()
            .find(|b| b.id == brand_id)
            .map(|b| b.models.clone())
            .unwrap_or_default())
    }

    /// Case-insensitive substring match on canonical or localized name.
    pub async fn search_brands(&self, query: &str) -> Result<Vec<CarBrand>> {
        let q = query.to_lowercase();
        let brands = self.get_brands().await?;
        Ok(brands.into_iter().filter(|b| b.matches(&q)).collect())
    }

    pub async fn search_models(&self, brand_id: &str, query: &str) -> Result<Vec<CarModel>> {
        let q = query.to_lowercase();
        let models = self.get_models_by_brand(brand_id).await?;
        Ok(models.into_iter().filter(|m| m.matches(&q)).collect())
    }

    /// Brands with a positive popularity score, most popular first.
    pub async fn get_popular_brands(&self) -> Result<Vec<CarBrand>> {
        let mut brands: Vec<CarBrand> = self
            .get_brands()
            .await?
            .into_iter()
            .filter(|b| b.popular > 0)
            .collect();
        brands.sort_by(|a, b| b.popular.cmp(&a.popular));
        Ok(brands)
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        info!("catalog: cache cleared");
    }

    /// Brand picker: short queries show the first brands unfiltered.
    pub async fn pick_brands(&self, query: &str) -> Result<Vec<CarBrand>> {
        if query.chars().count() < PICKER_MIN_QUERY {
            let mut brands = self.get_brands().await?;
            brands.truncate(PICKER_DEFAULT_LIMIT);
            return Ok(brands);
        }
        self.search_brands(query).await
    }

    /// Model picker: short queries show every model of the brand.
    pub async fn pick_models(&self, brand_id: &str, query: &str) -> Result<Vec<CarModel>> {
        if query.chars().count() < PICKER_MIN_QUERY {
            return self.get_models_by_brand(brand_id).await;
        }
        self.search_models(brand_id, query).await
    }
}
