//! Adapters - Implementations of application ports

mod directions_adapter;

pub use directions_adapter::{GeocodingAdapter, RoutingAdapter};
