use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// 请求体的结构之外的校验
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// 解析并校验 JSON 请求体，任何失败都返回 ValidationFailed
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationFailed(rejection.body_text()))?;

        value.validate().map_err(AppError::ValidationFailed)?;
        Ok(Self(value))
    }
}
