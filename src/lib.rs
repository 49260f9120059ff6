//! Package Match - ranking of bookable wedding service packages
//!
//! This library provides the matching core used by the marketplace's booking
//! wizard: an eligibility filter with a budget fallback, followed by a stable
//! ranking on hours or coverage fit.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{MatchError, MatchResult, PackageMatcher};
pub use models::{BudgetRange, CoverageMatching, Offering, Preference, PreferenceMode, ServiceType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = PackageMatcher::default()
            .match_packages(vec![], &Preference::for_service("Photography"))
            .unwrap();
        assert!(result.recommended().is_none());
    }
}
