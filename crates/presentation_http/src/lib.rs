//! Wayfinder HTTP presentation layer
//!
//! Exposes the directions pipeline as a JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use handlers::directions::DirectionsRequest;
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::{cors_layer, create_router};
pub use state::AppState;
