// handlers/mod.rs - one module per /api/v1 resource
//
// Handlers only bind and validate input, pick the caller out of the request
// extensions, and hand off to the matching service. Status classification
// happens in `ApiError`.

pub mod auth;
pub mod comment;
pub mod forum;
pub mod journal;
pub mod topic;
pub mod user;
pub mod vent;
