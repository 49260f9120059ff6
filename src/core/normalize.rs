use crate::models::CoverageMatching;

/// Normalize a coverage-moment label for comparison
#[inline]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Check whether two coverage-moment labels refer to the same moment
///
/// Fuzzy matching tolerates label variants such as "Cocktail" vs
/// "Cocktail Hour". Blank labels never match.
#[inline]
pub fn labels_match(a: &str, b: &str, mode: CoverageMatching) -> bool {
    let a = normalize_label(a);
    let b = normalize_label(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    match mode {
        CoverageMatching::Exact => a == b,
        CoverageMatching::Fuzzy => a.contains(&b) || b.contains(&a),
    }
}

/// Count desired moments covered by at least one of the offering's moments
pub fn coverage_overlap(covered: &[String], desired: &[String], mode: CoverageMatching) -> usize {
    desired
        .iter()
        .filter(|wanted| covered.iter().any(|have| labels_match(have, wanted, mode)))
        .count()
}
