use axum::{extract::{Path, State}, http::StatusCode, Json};
use history::{Car, CarDraft};
use serde::Serialize;

use crate::api_error::{from_history, from_join, not_found, ApiResult};
use crate::kv_exec::{read_store_blocking, with_store_blocking};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct CarsResponse {
    pub cars: Vec<Car>,
}

pub async fn list_cars(State(st): State<SharedState>) -> ApiResult<Json<CarsResponse>> {
    let cars = read_store_blocking(st.store.clone(), |store| history::list_cars(store))
        .await
        .map_err(from_join)?
        .map_err(from_history)?;

    Ok(Json(CarsResponse { cars }))
}

pub async fn post_car(
    State(st): State<SharedState>,
    Json(draft): Json<CarDraft>,
) -> ApiResult<(StatusCode, Json<Car>)> {
    let today = chrono::Local::now().date_naive();
    let car = with_store_blocking(st.store.clone(), move |store| history::add_car(store, draft, today))
        .await
        .map_err(from_join)?
        .map_err(from_history)?;

    Ok((StatusCode::CREATED, Json(car)))
}

pub async fn get_car(
    State(st): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Car>> {
    let car = read_store_blocking(st.store.clone(), move |store| history::get_car(store, &id))
        .await
        .map_err(from_join)?
        .map_err(from_history)?;

    car.map(Json).ok_or_else(|| not_found("Car"))
}
