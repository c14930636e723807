//! Property-based tests for route formatting
//!
//! These tests use proptest to verify the formatting rules hold across many
//! random inputs, not just the documented examples.

use application::ports::{Maneuver, ProviderStep};
use application::{format_distance, format_duration, format_instruction, format_step};
use proptest::prelude::*;

fn optional_word() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z_ ]{0,12}")
}

proptest! {
    #[test]
    fn short_durations_render_minutes_only(seconds in 0.0f64..3570.0) {
        let text = format_duration(seconds);
        prop_assert!(text.ends_with(" min"));
        prop_assert!(!text.contains("hr"));
    }

    #[test]
    fn long_durations_render_hours(seconds in 3570.0f64..1_000_000.0) {
        let text = format_duration(seconds);
        prop_assert!(text.contains(" hr "));
        let minutes: u64 = text
            .trim_end_matches(" min")
            .rsplit(' ')
            .next()
            .and_then(|m| m.parse().ok())
            .unwrap_or(u64::MAX);
        prop_assert!(minutes < 60);
    }

    #[test]
    fn short_distances_render_whole_meters(meters in 0.0f64..999.4) {
        let text = format_distance(meters);
        prop_assert!(text.ends_with(" m"));
        prop_assert!(!text.contains('.'));
    }

    #[test]
    fn long_distances_render_one_decimal_km(meters in 1000.0f64..10_000_000.0) {
        let text = format_distance(meters);
        prop_assert!(text.ends_with(" km"));
        let number = text.trim_end_matches(" km");
        let decimals = number.split('.').nth(1).map(str::len);
        prop_assert_eq!(decimals, Some(1));
    }

    #[test]
    fn instructions_always_name_a_road(
        kind in optional_word(),
        modifier in optional_word(),
        road in optional_word(),
    ) {
        let step = ProviderStep {
            maneuver: Maneuver { kind, modifier },
            road_name: road,
            distance_m: 10.0,
            duration_s: 10.0,
        };
        let text = format_instruction(&step);
        prop_assert!(text.contains(" on "));
        let expected_road = step.road_name.as_deref().filter(|r| !r.is_empty()).unwrap_or("road");
        prop_assert!(text.ends_with(expected_road));
        if step.maneuver.kind.as_deref().is_none_or(str::is_empty) {
            prop_assert!(text.starts_with("continue"));
        }
    }

    #[test]
    fn formatted_steps_never_expose_raw_numbers(
        distance in 0.0f64..100_000.0,
        duration in 0.0f64..100_000.0,
    ) {
        let step = ProviderStep {
            distance_m: distance,
            duration_s: duration,
            ..ProviderStep::default()
        };
        let formatted = format_step(&step);
        prop_assert!(formatted.distance.ends_with(" m") || formatted.distance.ends_with(" km"));
        prop_assert!(formatted.duration.ends_with(" min"));
    }
}
