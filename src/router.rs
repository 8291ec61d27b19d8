use axum::{
    Router,
    routing::{get, patch},
};

use crate::{
    AppState,
    middleware::{log_errors, session_middleware},
    routes,
};

pub fn build_router(state: AppState) -> Router {
    let vote_routes = Router::new()
        .route("/subreddit/post/vote", patch(routes::vote::vote_post))
        .route(
            "/subreddit/post/comment/vote",
            patch(routes::vote::vote_comment),
        )
        .route(
            "/subreddit/post/{post_id}/votes",
            get(routes::vote::post_votes),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    // 根路径不能 nest
    let base = state.config.api_base_uri.trim_end_matches('/');
    let router = if base.is_empty() {
        Router::new().merge(vote_routes)
    } else {
        Router::new().nest(base, vote_routes)
    };

    let router = router.layer(axum::middleware::from_fn(log_errors));

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
