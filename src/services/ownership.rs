//! Fetch-then-compare-owner guard shared by every owner-restricted service.

use std::future::Future;

use crate::database::manager::DatabaseError;
use crate::database::models::{Id, Owned};

use super::{ServiceError, ServiceResult};

/// Resolve a record and hand it back only if `caller` owns it.
///
/// A missing record propagates as not-found; a record owned by someone else
/// becomes `ServiceError::Forbidden` and nothing is written.
pub async fn authorized<T, F>(caller: Id, what: &str, fetch: F) -> ServiceResult<T>
where
    T: Owned,
    F: Future<Output = Result<T, DatabaseError>>,
{
    let record = fetch.await?;
    if record.owner_id() != caller {
        tracing::warn!(
            "User {} denied access to {} owned by user {}",
            caller,
            what,
            record.owner_id()
        );
        return Err(ServiceError::Forbidden(format!(
            "you are not the owner of this {}",
            what
        )));
    }
    Ok(record)
}
