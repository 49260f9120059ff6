use crate::models::{CoverageMatching, Offering, Preference, PreferenceMode};
use crate::core::normalize::coverage_overlap;

/// Calculate the ranking score for an eligible offering
///
/// Scoring by mode:
/// - hours:    -|durationHours - targetHours|, offerings without a duration score -inf
/// - coverage: number of desired moments the offering covers
/// - none:     0 for every offering, which leaves catalog order in place
///
/// Higher is better in every mode. Features are never scored.
pub fn calculate_offering_score(
    offering: &Offering,
    preference: &Preference,
    coverage_matching: CoverageMatching,
) -> f64 {
    match preference.preference_mode {
        PreferenceMode::Hours => match preference.target_hours {
            Some(target) => calculate_hours_score(offering.duration_hours, target),
            None => 0.0,
        },
        PreferenceMode::Coverage => calculate_coverage_score(
            &offering.coverage_events,
            &preference.desired_coverage,
            coverage_matching,
        ),
        PreferenceMode::None => 0.0,
    }
}

/// Calculate hours score; smaller gaps to the target score higher
#[inline]
fn calculate_hours_score(duration_hours: Option<f64>, target_hours: f64) -> f64 {
    match duration_hours {
        Some(hours) if hours.is_finite() => -(hours - target_hours).abs(),
        _ => f64::NEG_INFINITY,
    }
}

/// Calculate coverage score; more overlapping moments score higher
#[inline]
fn calculate_coverage_score(
    covered: &[String],
    desired: &[String],
    coverage_matching: CoverageMatching,
) -> f64 {
    coverage_overlap(covered, desired, coverage_matching) as f64
}
