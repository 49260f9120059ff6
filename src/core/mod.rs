// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use filters::{is_eligible, matches_budget, matches_service_type};
pub use matcher::{validate_preference, MatchError, MatchResult, PackageMatcher};
pub use normalize::{coverage_overlap, labels_match, normalize_label};
pub use scoring::calculate_offering_score;
