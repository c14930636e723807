//! Route formatting
//!
//! Pure functions that turn raw provider numbers and maneuvers into the
//! human-readable strings of the route contract. No I/O, never fails for
//! finite input.

use domain::{GeoPoint, RouteResult, RouteStep};

use crate::error::ApplicationError;
use crate::ports::{ProviderRoute, ProviderStep};

/// Default maneuver verb when the provider omits the type
const DEFAULT_MANEUVER: &str = "continue";

/// Placeholder used when a step has no road name
const DEFAULT_ROAD: &str = "road";

/// Format a duration in seconds as "M min" or "H hr M min"
///
/// Rounds to the nearest minute before splitting into hours.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: f64) -> String {
    // Safe: clamped to non-negative and durations never approach u64::MAX minutes
    let minutes = (seconds / 60.0).round().max(0.0) as u64;
    if minutes < 60 {
        return format!("{minutes} min");
    }
    format!("{} hr {} min", minutes / 60, minutes % 60)
}

/// Format a distance in meters as whole meters or kilometers with one decimal
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        let whole = meters.round().max(0.0) as u64;
        return format!("{whole} m");
    }
    format!("{:.1} km", meters / 1000.0)
}

/// Build the instruction text for a step: `<type>[ <modifier>] on <road>`
#[must_use]
pub fn format_instruction(step: &ProviderStep) -> String {
    let verb = non_empty(step.maneuver.kind.as_deref())
        .unwrap_or(DEFAULT_MANEUVER)
        .replace('_', " ");
    let modifier = non_empty(step.maneuver.modifier.as_deref())
        .map(|m| format!(" {}", m.to_lowercase()))
        .unwrap_or_default();
    let road = non_empty(step.road_name.as_deref()).unwrap_or(DEFAULT_ROAD);

    format!("{verb}{modifier} on {road}")
}

/// Convert one provider step into a rendering-ready [`RouteStep`]
#[must_use]
pub fn format_step(step: &ProviderStep) -> RouteStep {
    RouteStep::new(
        format_instruction(step),
        format_distance(step.distance_m),
        format_duration(step.duration_s),
    )
}

/// Map the provider's first itinerary and its first leg into a [`RouteResult`]
///
/// # Errors
///
/// Returns `NoRouteFound` if the provider route holds no itinerary.
pub fn format_route(
    route: &ProviderRoute,
    start: GeoPoint,
    end: GeoPoint,
) -> Result<RouteResult, ApplicationError> {
    let itinerary = route
        .primary()
        .ok_or_else(|| ApplicationError::no_route("No route found"))?;

    let steps = itinerary.first_leg_steps().iter().map(format_step).collect();

    Ok(RouteResult::new(
        format_distance(itinerary.distance_m),
        format_duration(itinerary.duration_s),
        steps,
        itinerary.geometry.clone(),
        start,
        end,
    )
    .with_polyline(itinerary.encoded_polyline.clone()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
