use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::{FieldErrors, Validate};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct VentRequest {
    pub message: String,
    /// Conversation to continue; the caller's default conversation when absent
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

impl Validate for VentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.required("message", &self.message);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VentResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearVentQuery {
    pub session_id: Option<Uuid>,
}
