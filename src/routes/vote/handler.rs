use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    middleware::Session,
    routes::extract::ValidatedJson,
    utils::{ack_api_response, success_to_api_response},
};

use super::model::{CommentVoteRequest, PostVoteRequest};

#[axum::debug_handler]
pub async fn vote_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(req): ValidatedJson<PostVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .votes
        .cast_vote(session.user(), req.target(), req.vote_type)
        .await?;

    Ok((StatusCode::OK, ack_api_response()))
}

#[axum::debug_handler]
pub async fn vote_comment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(req): ValidatedJson<CommentVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .votes
        .cast_vote(session.user(), req.target(), req.vote_type)
        .await?;

    Ok((StatusCode::OK, ack_api_response()))
}

#[axum::debug_handler]
pub async fn post_votes(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.votes.post_summary(session.user(), &post_id).await?;
    Ok((StatusCode::OK, success_to_api_response(summary)))
}
