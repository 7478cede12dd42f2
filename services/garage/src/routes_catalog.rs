use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use catalog::{CarBrand, CarModel};
use serde::{Deserialize, Serialize};

use crate::api_error::{from_catalog, ApiResult};
use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Catalog row as a picker shows it.
#[derive(Serialize)]
pub struct Picked<T> {
    pub display_name: String,
    #[serde(flatten)]
    pub item: T,
}

impl From<CarBrand> for Picked<CarBrand> {
    fn from(item: CarBrand) -> Self {
        Self { display_name: item.display_name().to_string(), item }
    }
}

impl From<CarModel> for Picked<CarModel> {
    fn from(item: CarModel) -> Self {
        Self { display_name: item.display_name().to_string(), item }
    }
}

fn picked<T>(items: Vec<T>) -> Vec<Picked<T>>
where
    Picked<T>: From<T>,
{
    items.into_iter().map(Picked::from).collect()
}

#[derive(Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<Picked<CarBrand>>,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<Picked<CarModel>>,
}

pub async fn get_brands(
    State(st): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<BrandsResponse>> {
    let brands = st.catalog.pick_brands(&params.q).await.map_err(from_catalog)?;
    Ok(Json(BrandsResponse { brands: picked(brands) }))
}

pub async fn get_popular_brands(State(st): State<SharedState>) -> ApiResult<Json<BrandsResponse>> {
    let brands = st.catalog.get_popular_brands().await.map_err(from_catalog)?;
    Ok(Json(BrandsResponse { brands: picked(brands) }))
}

pub async fn get_models(
    State(st): State<SharedState>,
    Path(brand_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<ModelsResponse>> {
    let models = st
        .catalog
        .pick_models(&brand_id, &params.q)
        .await
        .map_err(from_catalog)?;
    Ok(Json(ModelsResponse { models: picked(models) }))
}

pub async fn post_clear_cache(State(st): State<SharedState>) -> StatusCode {
    st.catalog.clear_cache().await;
    StatusCode::NO_CONTENT
}

pub async fn get_catalog_info(State(st): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "source": st.catalog.source().info(),
        "ttl_secs": st.catalog.ttl().num_seconds(),
    }))
}
