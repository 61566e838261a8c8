use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::Validate;
use crate::error::ApiError;

/// `Json<T>` that answers 400 on bad syntax, missing fields or failed `Validate` checks
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
