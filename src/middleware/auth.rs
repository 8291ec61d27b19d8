use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    utils::{Claims, verify_token},
};

/// 当前请求的登录态，未登录时为 None，由业务逻辑决定是否拒绝
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<Claims>);

impl Session {
    pub fn user(&self) -> Option<&Claims> {
        self.0.as_ref()
    }
}

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .and_then(|auth| match verify_token(auth.token(), &state.config) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Ignoring invalid bearer token: {}", e);
                None
            }
        });

    request.extensions_mut().insert(Session(claims));
    next.run(request).await
}
