//! Plain-text rendering of routes and errors

use std::fmt::Write;

use domain::RouteResult;

/// Render a route as a numbered step list
#[must_use]
pub fn render_route(route: &RouteResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "From: {}", route.start().label());
    let _ = writeln!(out, "To:   {}", route.end().label());
    let _ = writeln!(
        out,
        "Distance: {}  Duration: {}",
        route.distance(),
        route.duration()
    );

    if route.steps().is_empty() {
        out.push_str("\nNo turn-by-turn steps available.\n");
        return out;
    }

    out.push('\n');
    let width = route.steps().len().to_string().len();
    for (index, step) in route.steps().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>width$}. {} ({}, {})",
            index + 1,
            step.instruction,
            step.distance,
            step.duration,
        );
    }

    out
}

/// Render an error body returned by the server
#[must_use]
pub fn render_error(status: u16, body: &serde_json::Value) -> String {
    let message = body
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Unexpected response from server");
    match body.get("code").and_then(serde_json::Value::as_str) {
        Some(code) => format!("Error ({status}, {code}): {message}"),
        None => format!("Error ({status}): {message}"),
    }
}
