use crate::models::{BudgetRange, Offering, Preference};

/// Check the service-type constraint
///
/// This is the first hard constraint of the eligibility filter and the only
/// one kept on the fallback path.
#[inline]
pub fn matches_service_type(offering: &Offering, preference: &Preference) -> bool {
    offering.service_type == preference.service_type
}

/// Check the budget constraint; no range means every price passes
#[inline]
pub fn matches_budget(offering: &Offering, budget: Option<&BudgetRange>) -> bool {
    budget.map_or(true, |range| range.contains(offering.price_cents))
}

/// Check every hard constraint of the eligibility filter
#[inline]
pub fn is_eligible(offering: &Offering, preference: &Preference) -> bool {
    matches_service_type(offering, preference)
        && matches_budget(offering, preference.budget_range.as_ref())
}
