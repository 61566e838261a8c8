// handlers/vent.rs - /api/v1/vents handlers

use axum::extract::{Query, State};

use crate::api::vent::{ClearVentQuery, VentRequest, VentResponse};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidatedJson};
use crate::router::AppState;

/**
 * POST /api/v1/vents - Talk to the venting assistant
 *
 * Expected Input:
 * ```json
 * { "message": "Hari ini berat sekali", "session_id": "optional uuid" }
 * ```
 *
 * The reply continues the caller's conversation for that session. An
 * upstream generation failure answers 502 and leaves the transcript as it was.
 */
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<VentRequest>,
) -> ApiResult<VentResponse> {
    Ok(ApiResponse::success(state.vents.chat(auth.user_id, req).await?))
}

/// DELETE /api/v1/vents[?session_id=] - forget one session, or all of the caller's
pub async fn clear(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClearVentQuery>,
) -> ApiResult<()> {
    state.vents.clear(auth.user_id, query.session_id).await;
    Ok(ApiResponse::no_content())
}
