//! Request and response shapes of the `/api/v1` surface.

pub mod comment;
pub mod forum;
pub mod journal;
pub mod topic;
pub mod user;
pub mod validate;
pub mod vent;

pub use validate::{FieldErrors, Validate};
