use axum::{http::StatusCode, Json};
use catalog::CatalogError;
use history::HistoryError;
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn reply(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error: msg.into() }))
}

pub fn not_found(what: &str) -> (StatusCode, Json<ApiError>) {
    reply(StatusCode::NOT_FOUND, format!("{what} not found"))
}

/// Validation problems go back verbatim; storage failures get a generic text.
pub fn from_history(e: HistoryError) -> (StatusCode, Json<ApiError>) {
    match e {
        HistoryError::Validation(v) => reply(StatusCode::BAD_REQUEST, v.to_string()),
        other => {
            error!(error = %other, "garage: storage operation failed");
            reply(StatusCode::INTERNAL_SERVER_ERROR, "Could not access saved data.")
        }
    }
}

pub fn from_catalog(e: CatalogError) -> (StatusCode, Json<ApiError>) {
    reply(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
}

pub fn from_join(e: tokio::task::JoinError) -> (StatusCode, Json<ApiError>) {
    error!(error = %e, "garage: storage task panicked");
    reply(StatusCode::INTERNAL_SERVER_ERROR, "Could not access saved data.")
}
