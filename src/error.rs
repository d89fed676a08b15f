/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / ARM CloudError body)
 *
 * Body shape:
 *   { "error": { "code": "...", "message": "...", "target": "..." } }
 * target は空なら省略する
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const CLOUD_ERROR_CODE_INVALID_PARAMETER: &str = "InvalidParameter";
pub const CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE: &str = "InvalidSubscriptionState";
pub const CLOUD_ERROR_CODE_INTERNAL_SERVER_ERROR: &str = "InternalServerError";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest {
        code: &'static str,
        target: String,
        message: String,
    },
    #[error("{code}: {message}")]
    Conflict {
        code: &'static str,
        target: String,
        message: String,
    },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            target: String::new(),
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            target: String::new(),
            message: message.into(),
        }
    }

    /// Sets the CloudError `target` (the offending field or parameter).
    pub fn with_target(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            AppError::BadRequest { target, .. } | AppError::Conflict { target, .. } => {
                *target = value.into();
            }
            AppError::Internal => {}
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { code, .. } | AppError::Conflict { code, .. } => code,
            AppError::Internal => CLOUD_ERROR_CODE_INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, target, message) = match self {
            AppError::BadRequest {
                code,
                target,
                message,
            }
            | AppError::Conflict {
                code,
                target,
                message,
            } => (code, target, message),
            AppError::Internal => (
                CLOUD_ERROR_CODE_INTERNAL_SERVER_ERROR,
                String::new(),
                "Internal server error.".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                target,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_renders_cloud_error() {
        let err = AppError::bad_request(CLOUD_ERROR_CODE_INVALID_PARAMETER, "missing")
            .with_target("subscriptionid");
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "InvalidParameter");
        assert_eq!(body["error"]["message"], "missing");
        assert_eq!(body["error"]["target"], "subscriptionid");
    }

    #[tokio::test]
    async fn empty_target_is_omitted() {
        let err = AppError::conflict(CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE, "nope");
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].get("target").is_none());
    }

    #[tokio::test]
    async fn internal_does_not_leak_details() {
        let (status, body) = body_json(AppError::Internal).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "InternalServerError");
        assert_eq!(body["error"]["message"], "Internal server error.");
    }
}
