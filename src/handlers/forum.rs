// handlers/forum.rs - /api/v1/forums handlers

use axum::extract::{Path, State};

use crate::api::forum::{CreateForumRequest, ForumResponse, UpdateForumRequest};
use crate::database::models::Id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::router::AppState;

/**
 * POST /api/v1/forums - Open a thread tagged with existing topics
 *
 * Expected Input:
 * ```json
 * { "title": "Butuh saran", "content": "...", "topics": [1, 2] }
 * ```
 *
 * Any id in `topics` that names no topic fails the whole request with 404.
 */
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateForumRequest>,
) -> ApiResult<ForumResponse> {
    Ok(ApiResponse::created(state.forums.create(auth.user_id, req).await?))
}

/// GET /api/v1/forums
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ForumResponse>> {
    Ok(ApiResponse::success(state.forums.find_all().await?))
}

/// GET /api/v1/forums/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<ForumResponse> {
    Ok(ApiResponse::success(state.forums.find_by_id(id).await?))
}

/// PUT /api/v1/forums/:id - owner only; `topics`, when present, replaces the tag set
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Id>,
    ValidatedJson(req): ValidatedJson<UpdateForumRequest>,
) -> ApiResult<ForumResponse> {
    Ok(ApiResponse::success(state.forums.update(id, auth.user_id, req).await?))
}

/// DELETE /api/v1/forums/:id - owner only
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Id>) -> ApiResult<()> {
    state.forums.delete(id, auth.user_id).await?;
    Ok(ApiResponse::no_content())
}

/// DELETE /api/v1/forums/:id/topic - owner only; untags the forum completely
pub async fn remove_topics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<()> {
    state.forums.remove_topics(id, auth.user_id).await?;
    Ok(ApiResponse::no_content())
}
