use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(format!("store: {}", e))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::Internal(format!("cache: {}", e))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Unauthorized => (error_codes::AUTH_FAILED, "未授权访问".to_string()),
            AppError::ValidationFailed(reason) => (
                error_codes::VALIDATION_ERROR,
                format!("请求数据无效: {}", reason),
            ),
            AppError::NotFound(what) => (error_codes::NOT_FOUND, not_found_message(what)),
            AppError::Internal(detail) => {
                // 内部错误细节只写日志，不返回给调用方
                tracing::error!("Request failed: {}", detail);
                (
                    error_codes::INTERNAL_ERROR,
                    "投票失败，请稍后重试".to_string(),
                )
            }
        };

        (status, error_to_api_response::<()>(code, message)).into_response()
    }
}

fn not_found_message(what: &str) -> String {
    let noun = match what {
        "post" => "帖子",
        "comment" => "评论",
        _ => "资源",
    };
    format!("{}不存在", noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn taxonomy_maps_to_http_status() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::ValidationFailed("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::NotFound("post").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn not_found_message_is_localized() {
        let (status, body) = body_json(AppError::NotFound("post")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], error_codes::NOT_FOUND);
        assert_eq!(body["msg"], "帖子不存在");
    }

    #[tokio::test]
    async fn internal_error_hides_store_detail() {
        let err = AppError::from(sqlx::Error::Protocol("relation post_votes is locked".into()));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], error_codes::INTERNAL_ERROR);
        assert!(!body["msg"].as_str().unwrap().contains("post_votes"));
    }
}
