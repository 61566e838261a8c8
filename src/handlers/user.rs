// handlers/user.rs - /api/v1/users handlers

use axum::extract::{Path, State};

use crate::api::user::{UpdateUserRequest, UserResponse};
use crate::database::models::Id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::router::AppState;

/// GET /api/v1/users/me - the caller's own account (token required)
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(state.users.find_me(auth.user_id).await?))
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    Ok(ApiResponse::success(state.users.find_all().await?))
}

/// GET /api/v1/users/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(state.users.find_by_id(id).await?))
}

/// PUT /api/v1/users/:id - only the account owner
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Id>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(state.users.update(id, auth.user_id, req).await?))
}

/// DELETE /api/v1/users/:id - only the account owner
pub async fn delete(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Id>) -> ApiResult<()> {
    state.users.delete(id, auth.user_id).await?;
    Ok(ApiResponse::no_content())
}
