//! Application services

mod directions_service;
pub mod route_formatter;

pub use directions_service::DirectionsService;
pub use route_formatter::{format_distance, format_duration, format_instruction, format_route, format_step};
