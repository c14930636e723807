//! Domain entities - The route contract handed back to callers

mod route;

pub use route::{RouteResult, RouteStep};
