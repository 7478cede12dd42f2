use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use history::{
    Car, HistoryEntry, HistoryFilter, HistoryQuery, ServiceDraft, SortDirection, SortKey, SortState,
    WorksPreset,
};
use serde::{Deserialize, Serialize};

use crate::api_error::{from_history, from_join, not_found, ApiResult};
use crate::kv_exec::{read_store_blocking, with_store_blocking};
use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct HistoryParams {
    pub date: Option<String>,
    pub parts: Option<String>,
    pub sort: Option<SortKey>,
    pub order: Option<SortDirection>,
}

impl HistoryParams {
    fn into_query(self) -> HistoryQuery {
        let default = SortState::default();
        HistoryQuery {
            filter: HistoryFilter {
                date: self.date.unwrap_or_default(),
                parts: self.parts.unwrap_or_default(),
            },
            sort: SortState {
                key: self.sort.unwrap_or(default.key),
                direction: self.order.unwrap_or(default.direction),
            },
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub sort: SortState,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct ServiceDetailResponse {
    pub car: Option<Car>,
    pub service: HistoryEntry,
}

#[derive(Serialize)]
pub struct PresetItem {
    pub id: WorksPreset,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<PresetItem>,
}

pub async fn get_works_presets() -> Json<PresetsResponse> {
    let presets = WorksPreset::ALL
        .iter()
        .map(|&id| PresetItem { id, label: id.label() })
        .collect();
    Json(PresetsResponse { presets })
}

pub async fn get_history(
    State(st): State<SharedState>,
    Path(car_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<HistoryResponse>> {
    let query = params.into_query();
    let sort = query.sort;
    let entries = read_store_blocking(st.store.clone(), move |store| {
        history::query_services(store, &car_id, &query)
    })
    .await
    .map_err(from_join)?
    .map_err(from_history)?;

    Ok(Json(HistoryResponse { sort, entries }))
}

pub async fn post_service(
    State(st): State<SharedState>,
    Path(car_id): Path<String>,
    Json(mut draft): Json<ServiceDraft>,
) -> ApiResult<(StatusCode, Json<HistoryEntry>)> {
    draft.car_id = car_id;
    let record = with_store_blocking(st.store.clone(), move |store| history::add_service(store, draft))
        .await
        .map_err(from_join)?
        .map_err(from_history)?;

    Ok((StatusCode::CREATED, Json(HistoryEntry::from(record))))
}

pub async fn get_service(
    State(st): State<SharedState>,
    Path((car_id, service_id)): Path<(String, String)>,
) -> ApiResult<Json<ServiceDetailResponse>> {
    let found = read_store_blocking(st.store.clone(), move |store| {
        let car = history::get_car(store, &car_id)?;
        let service = history::get_service(store, &car_id, &service_id)?;
        Ok::<_, history::HistoryError>((car, service))
    })
    .await
    .map_err(from_join)?
    .map_err(from_history)?;

    match found {
        (car, Some(service)) => Ok(Json(ServiceDetailResponse {
            car,
            service: HistoryEntry::from(service),
        })),
        (_, None) => Err(not_found("Service record")),
    }
}
