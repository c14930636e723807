//! Wayfinder CLI
//!
//! Command definitions and output rendering for `wayfinder-cli`.

pub mod cli;
pub mod render;

pub use cli::{Cli, Commands, DEFAULT_SERVER_URL, endpoint_url, log_filter_from_verbosity};
pub use render::{render_error, render_route};
