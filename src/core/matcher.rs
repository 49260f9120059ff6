use crate::models::{CoverageMatching, Offering, Preference, PreferenceMode};
use crate::core::{
    filters::{is_eligible, matches_service_type},
    scoring::calculate_offering_score,
};
use thiserror::Error;

/// Errors that can occur when matching packages
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Eligible offerings, best first
    pub ranked: Vec<Offering>,
    /// Budget filter removed everything and the service-type-only set was ranked
    pub used_fallback: bool,
    pub total_candidates: usize,
}

impl MatchResult {
    /// Top recommendation, absent when nothing is eligible
    pub fn recommended(&self) -> Option<&Offering> {
        self.ranked.first()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Package matching orchestrator - implements the two-phase pipeline
///
/// # Pipeline Stages
/// 1. Eligibility filter (service type, then budget)
/// 2. Budget fallback when the strict filter leaves nothing
/// 3. Scoring and stable ranking
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageMatcher {
    coverage_matching: CoverageMatching,
}

impl PackageMatcher {
    pub fn new(coverage_matching: CoverageMatching) -> Self {
        Self { coverage_matching }
    }

    pub fn coverage_matching(&self) -> CoverageMatching {
        self.coverage_matching
    }

    /// Rank the candidates that fit a preference
    ///
    /// # Arguments
    /// * `candidates` - Catalog snapshot, in catalog order
    /// * `preference` - The buyer's accumulated preference
    ///
    /// # Returns
    /// MatchResult with the eligible offerings ranked best first, or
    /// `MatchError::InvalidPreference` when the preference cannot be used.
    pub fn match_packages(
        &self,
        candidates: Vec<Offering>,
        preference: &Preference,
    ) -> Result<MatchResult, MatchError> {
        validate_preference(preference)?;

        let total_candidates = candidates.len();

        // Stage 1a: Service type
        let mut eligible: Vec<Offering> = candidates
            .into_iter()
            .filter(|offering| matches_service_type(offering, preference))
            .collect();

        // Stage 1b + 2: Budget, falling back to service type only
        let mut used_fallback = false;
        if preference.budget_range.is_some() {
            if eligible.iter().any(|offering| is_eligible(offering, preference)) {
                eligible.retain(|offering| is_eligible(offering, preference));
            } else if !eligible.is_empty() {
                tracing::debug!(
                    "No {} packages within budget {:?}, falling back to {} service-type matches",
                    preference.service_type,
                    preference.budget_range,
                    eligible.len()
                );
                used_fallback = true;
            }
        }

        // Stage 3: Scoring and ranking
        let ranked = self.rank(eligible, preference);

        tracing::trace!(
            "Ranked {} of {} candidates for {} (fallback: {})",
            ranked.len(),
            total_candidates,
            preference.service_type,
            used_fallback
        );

        Ok(MatchResult {
            ranked,
            used_fallback,
            total_candidates,
        })
    }

    fn rank(&self, eligible: Vec<Offering>, preference: &Preference) -> Vec<Offering> {
        if preference.preference_mode == PreferenceMode::None {
            return eligible;
        }

        let mut scored: Vec<(f64, Offering)> = eligible
            .into_iter()
            .map(|offering| {
                let score = calculate_offering_score(&offering, preference, self.coverage_matching);
                (score, offering)
            })
            .collect();

        // Stable sort keeps catalog order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored.into_iter().map(|(_, offering)| offering).collect()
    }
}

/// Check that a preference gives the matcher something to work with
pub fn validate_preference(preference: &Preference) -> Result<(), MatchError> {
    if preference.service_type.is_blank() {
        return Err(MatchError::InvalidPreference(
            "serviceType is required".to_string(),
        ));
    }

    if let Some(budget) = &preference.budget_range {
        if budget.is_inverted() {
            return Err(MatchError::InvalidPreference(format!(
                "budgetRange min {:?} exceeds max {:?}",
                budget.min, budget.max
            )));
        }
    }

    if preference.preference_mode == PreferenceMode::Hours {
        match preference.target_hours {
            Some(hours) if hours.is_finite() && hours >= 0.0 => {}
            Some(hours) => {
                return Err(MatchError::InvalidPreference(format!(
                    "targetHours must be a non-negative number, got {}",
                    hours
                )));
            }
            None => {
                return Err(MatchError::InvalidPreference(
                    "targetHours is required when preferenceMode is hours".to_string(),
                ));
            }
        }
    }

    Ok(())
}
