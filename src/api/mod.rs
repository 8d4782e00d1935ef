//! HTTP API module for the leave engine.
//!
//! This module exposes the store, overlap queries, capacity checks and
//! calendar reports as a JSON REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LeaveRecordRequest, SyncRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
