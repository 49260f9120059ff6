use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a bookable package
///
/// Known labels are normalized to a fixed vocabulary so that "DJ" and
/// "DJ Services" land on the same variant. Anything else is carried as
/// `Custom` with the trimmed label the catalog supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Photography,
    Videography,
    DjServices,
    LiveMusician,
    Coordination,
    Planning,
    Custom(String),
}

const KNOWN_SERVICE_TYPES: [ServiceType; 6] = [
    ServiceType::Photography,
    ServiceType::Videography,
    ServiceType::DjServices,
    ServiceType::LiveMusician,
    ServiceType::Coordination,
    ServiceType::Planning,
];

/// Case folding shared by equality and cache keys
#[inline]
fn fold_label(label: &str) -> String {
    label.trim().to_lowercase()
}

impl ServiceType {
    /// Display label used on the wire
    pub fn label(&self) -> &str {
        match self {
            ServiceType::Custom(label) => label,
            known => known.alias_labels()[0],
        }
    }

    /// Catalog labels that map onto a known variant, canonical label first
    fn alias_labels(&self) -> &'static [&'static str] {
        match self {
            ServiceType::Photography => &["Photography", "Photographer"],
            ServiceType::Videography => &["Videography", "Videographer"],
            ServiceType::DjServices => &["DJ Services", "DJ", "DJ Service"],
            ServiceType::LiveMusician => &["Live Musician", "Live Musicians", "Live Music"],
            ServiceType::Coordination => &["Coordination", "Coordinator", "Day-of Coordination"],
            ServiceType::Planning => &["Planning", "Planner", "Wedding Planning"],
            ServiceType::Custom(_) => &[],
        }
    }

    /// Every stored label that compares equal to this service type
    ///
    /// Known variants list their aliases as written and lowercased; a custom
    /// type lists its own label. Used to query the catalog for the same set
    /// the matcher accepts.
    pub fn aliases(&self) -> Vec<String> {
        if let ServiceType::Custom(label) = self {
            return vec![label.clone()];
        }

        let mut labels: Vec<String> = self.alias_labels().iter().map(|l| l.to_string()).collect();
        for alias in self.alias_labels() {
            let lower = alias.to_lowercase();
            if !labels.contains(&lower) {
                labels.push(lower);
            }
        }
        labels
    }

    /// True when no selectable category was given
    pub fn is_blank(&self) -> bool {
        matches!(self, ServiceType::Custom(label) if label.is_empty())
    }

    /// Lowercased key, stable across label variants
    pub fn key(&self) -> String {
        fold_label(self.label())
    }
}

impl From<&str> for ServiceType {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        KNOWN_SERVICE_TYPES
            .iter()
            .find(|known| known.alias_labels().iter().any(|alias| alias.eq_ignore_ascii_case(trimmed)))
            .cloned()
            .unwrap_or_else(|| ServiceType::Custom(trimmed.to_string()))
    }
}

impl From<String> for ServiceType {
    fn from(value: String) -> Self {
        ServiceType::from(value.as_str())
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        value.label().to_string()
    }
}

impl PartialEq for ServiceType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ServiceType::Custom(a), ServiceType::Custom(b)) => fold_label(a) == fold_label(b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl Eq for ServiceType {}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bookable service package from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "vendorId", default)]
    pub vendor_id: Option<String>,
    #[serde(rename = "serviceType")]
    pub service_type: ServiceType,
    #[serde(rename = "priceCents")]
    pub price_cents: u64,
    #[serde(rename = "durationHours", default)]
    pub duration_hours: Option<f64>,
    #[serde(rename = "coverageEvents", default)]
    pub coverage_events: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Inclusive price window in cents; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
}

impl BudgetRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    #[inline]
    pub fn contains(&self, price_cents: u64) -> bool {
        self.min.map_or(true, |min| price_cents >= min)
            && self.max.map_or(true, |max| price_cents <= max)
    }

    /// Both bounds present and inverted
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Which ranking signal applies to eligible offerings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceMode {
    Hours,
    Coverage,
    #[default]
    None,
}

/// Buyer input for one service-type search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(rename = "serviceType")]
    pub service_type: ServiceType,
    #[serde(rename = "eventType", default)]
    pub event_type: Option<String>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<BudgetRange>,
    #[serde(rename = "preferenceMode", default)]
    pub preference_mode: PreferenceMode,
    #[serde(rename = "targetHours", default)]
    pub target_hours: Option<f64>,
    #[serde(rename = "desiredCoverage", default)]
    pub desired_coverage: Vec<String>,
}

impl Preference {
    /// Preference with only a service type and catalog ordering
    pub fn for_service(service_type: impl Into<ServiceType>) -> Self {
        Self {
            service_type: service_type.into(),
            event_type: None,
            budget_range: None,
            preference_mode: PreferenceMode::None,
            target_hours: None,
            desired_coverage: Vec::new(),
        }
    }

    pub fn with_budget(mut self, budget: BudgetRange) -> Self {
        self.budget_range = Some(budget);
        self
    }

    pub fn with_target_hours(mut self, hours: f64) -> Self {
        self.preference_mode = PreferenceMode::Hours;
        self.target_hours = Some(hours);
        self
    }

    pub fn with_desired_coverage<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preference_mode = PreferenceMode::Coverage;
        self.desired_coverage = events.into_iter().map(Into::into).collect();
        self
    }
}

/// How coverage-moment labels are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageMatching {
    /// Either lowercased label contains the other ("Cocktail" ~ "Cocktail Hour")
    #[default]
    Fuzzy,
    /// Lowercased, trimmed equality
    Exact,
}
