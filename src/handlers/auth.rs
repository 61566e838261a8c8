// handlers/auth.rs - POST /api/v1/auth/{login,register}
//
// Token acquisition endpoints. Both are exempt from the JWT middleware.

use axum::extract::State;

use crate::api::user::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::router::AppState;

/**
 * POST /api/v1/auth/login - Authenticate and receive a JWT
 *
 * Expected Input:
 * ```json
 * { "email": "rani@zense.app", "password": "rahasia123" }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "success": true,
 *   "data": { "id": 1, "name": "rani", "token": "eyJhbGciOiJIUzI1NiI...", "expires_in": 600 }
 * }
 * ```
 *
 * Unknown email and wrong password both answer 401 with the same message.
 */
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    Ok(ApiResponse::success(state.users.login(req).await?))
}

/// POST /api/v1/auth/register - create an account; 409 when the email is taken
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<UserResponse> {
    Ok(ApiResponse::created(state.users.register(req).await?))
}
