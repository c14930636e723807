//! Domain layer for Wayfinder
//!
//! Contains the route contract returned to callers, the geographic value
//! objects it is built from, and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
