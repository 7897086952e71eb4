use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reelmix_catalog::CatalogError;
use reelmix_core::error::{ApiError, ErrorEnvelope};

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let api = match e {
            CatalogError::UpstreamFetchFailed { upstream, reason } => {
                tracing::warn!(upstream = %upstream, reason = %reason, "upstream fetch failed");
                ApiError::Upstream {
                    upstream: upstream.to_string(),
                    message: reason,
                }
            }
            CatalogError::NotFound => ApiError::NotFound("no such title".into()),
            CatalogError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            CatalogError::Cancelled => {
                ApiError::Conflict("superseded by a newer request".into())
            }
        };
        Self(api)
    }
}
