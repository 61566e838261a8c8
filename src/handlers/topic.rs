// handlers/topic.rs - /api/v1/topics handlers
//
// Topics have no owner. Writes still pass through the JWT middleware.

use axum::extract::{Path, State};

use crate::api::topic::{CreateTopicRequest, TopicResponse, UpdateTopicRequest};
use crate::database::models::Id;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::router::AppState;

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTopicRequest>,
) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::created(state.topics.create(req).await?))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<TopicResponse>> {
    Ok(ApiResponse::success(state.topics.find_all().await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::success(state.topics.find_by_id(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    ValidatedJson(req): ValidatedJson<UpdateTopicRequest>,
) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::success(state.topics.update(id, req).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<()> {
    state.topics.delete(id).await?;
    Ok(ApiResponse::no_content())
}
