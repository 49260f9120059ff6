// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BudgetRange, CoverageMatching, Offering, Preference, PreferenceMode, ServiceType};
pub use requests::{MatchPackagesRequest, RankPackagesRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchPackagesResponse};
