pub mod auth;
pub mod response;
pub mod validated_json;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use response::{ApiResponse, ApiResult};
pub use validated_json::ValidatedJson;
