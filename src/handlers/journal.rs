// handlers/journal.rs - /api/v1/journals handlers

use axum::extract::{Path, State};

use crate::api::journal::{CreateJournalRequest, JournalResponse, UpdateJournalRequest};
use crate::database::models::Id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::router::AppState;

/// POST /api/v1/journals - new journal owned by the caller
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateJournalRequest>,
) -> ApiResult<JournalResponse> {
    Ok(ApiResponse::created(state.journals.create(auth.user_id, req).await?))
}

/// GET /api/v1/journals - 404 when there are none
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<JournalResponse>> {
    Ok(ApiResponse::success(state.journals.find_all().await?))
}

/// GET /api/v1/journals/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<JournalResponse> {
    Ok(ApiResponse::success(state.journals.find_by_id(id).await?))
}

/// PUT /api/v1/journals/:id - owner only, absent fields unchanged
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Id>,
    ValidatedJson(req): ValidatedJson<UpdateJournalRequest>,
) -> ApiResult<JournalResponse> {
    Ok(ApiResponse::success(state.journals.update(id, auth.user_id, req).await?))
}

/// DELETE /api/v1/journals/:id - owner only
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Id>) -> ApiResult<()> {
    state.journals.delete(id, auth.user_id).await?;
    Ok(ApiResponse::no_content())
}
