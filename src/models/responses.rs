use serde::{Deserialize, Serialize};
use crate::models::domain::Offering;
use crate::services::CacheStats;

/// Response for the match and rank endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPackagesResponse {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub recommended: Option<Offering>,
    pub ranked: Vec<Offering>,
    #[serde(rename = "usedFallback")]
    pub used_fallback: bool,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalEligible")]
    pub total_eligible: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
