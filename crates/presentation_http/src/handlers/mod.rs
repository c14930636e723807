//! HTTP request handlers

pub mod directions;
pub mod health;
