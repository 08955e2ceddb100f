//! Engine errors as HTTP responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use lot_core::LotError;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub violations: Vec<String>,
}

#[derive(Debug)]
pub struct ApiError(pub LotError);

impl From<LotError> for ApiError {
    fn from(err: LotError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &LotError) -> StatusCode {
    match err {
        LotError::Prerequisite(_) | LotError::Format(_) => StatusCode::BAD_REQUEST,
        LotError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LotError::DuplicateLot(_) => StatusCode::CONFLICT,
        LotError::UnknownLot(_) => StatusCode::NOT_FOUND,
        LotError::Counter(_) | LotError::Config(_) | LotError::Serialize(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            code: self.0.code(),
            message: self.0.to_string(),
            violations: self.0.messages(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lot_core::PrerequisiteError;

    #[test]
    fn test_status_mapping() {
        let prereq = LotError::from(PrerequisiteError::new(vec!["x".to_string()]));
        assert_eq!(status_for(&prereq), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&LotError::Format("pdf".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&LotError::DuplicateLot("L".into())), StatusCode::CONFLICT);
        assert_eq!(status_for(&LotError::UnknownLot("L".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&LotError::Counter("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
