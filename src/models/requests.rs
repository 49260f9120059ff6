use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Offering, Preference};

/// Request to match packages from the hosted catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchPackagesRequest {
    #[serde(flatten)]
    pub preference: Preference,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank a caller-supplied candidate snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankPackagesRequest {
    pub preference: Preference,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub candidates: Vec<Offering>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
