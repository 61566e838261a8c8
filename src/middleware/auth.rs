use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{request::Parts, HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::database::models::Id;
use crate::error::ApiError;
use crate::router::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Id,
}

/// Which requests must carry a bearer token.
///
/// Login and register are always open, `/users/me` always needs a token,
/// and everything else needs one unless it is a read.
pub fn requires_auth(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    match path {
        "/api/v1/auth/login" | "/api/v1/auth/register" => false,
        "/api/v1/users/me" => true,
        _ => method != Method::GET,
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = match request.extensions().get::<OriginalUri>() {
        Some(original) => original.path().to_string(),
        None => request.uri().path().to_string(),
    };
    if !requires_auth(request.method(), &path) {
        return Ok(next.run(request).await);
    }

    let token = extract_jwt_from_headers(request.headers()).map_err(ApiError::unauthorized)?;
    let claims = state
        .tokens
        .validate(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
