//! Application layer - Use cases and orchestration
//!
//! Defines the provider ports the directions pipeline depends on, the pure
//! formatting rules that turn provider payloads into the route contract, and
//! the [`DirectionsService`] that orchestrates geocoding and routing.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ProviderKind, TransportFailureKind};
pub use ports::*;
pub use services::*;
