// handlers/comment.rs - /api/v1/comments handlers

use axum::extract::{Path, State};

use crate::api::comment::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::database::models::Id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::router::AppState;

/// POST /api/v1/comments - reply to an existing forum; visibility defaults to review
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<CommentResponse> {
    Ok(ApiResponse::created(state.comments.create(auth.user_id, req).await?))
}

/// GET /api/v1/comments
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CommentResponse>> {
    Ok(ApiResponse::success(state.comments.find_all().await?))
}

/// GET /api/v1/comments/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<CommentResponse> {
    Ok(ApiResponse::success(state.comments.find_by_id(id).await?))
}

/// PUT /api/v1/comments/:id - owner only
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Id>,
    ValidatedJson(req): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<CommentResponse> {
    Ok(ApiResponse::success(state.comments.update(id, auth.user_id, req).await?))
}

/// DELETE /api/v1/comments/:id - owner only
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Id>) -> ApiResult<()> {
    state.comments.delete(id, auth.user_id).await?;
    Ok(ApiResponse::no_content())
}
