//! # Named Composite Predicates
//!
//! Composite conditions referenced by rule triggers under the `conditions`
//! key. Unlike field triggers, each predicate is computed over the *entire*
//! profile, so cross-field logic (location OR data-type, location AND
//! sector) lives here as code rather than in the rule data.
//!
//! ## Registry
//!
//! The registry is a closed mapping from condition name to predicate
//! function. New composite conditions are added via
//! [`PredicateRegistry::register`] without touching the evaluator loop; an
//! unregistered name appearing in a rule is rejected at table-validation
//! time (see [`crate::rule::RuleTable::validate_conditions`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regscope_core::OrganizationProfile;

/// Jurisdiction codes treated as EU/EEA exposure by
/// [`any_eu_data_processing`].
///
/// UK is deliberately included: post-Brexit processing in the UK still
/// implies EU-grade data protection exposure for scoping purposes.
pub const EU_JURISDICTIONS: [&str; 7] = [
    "EU",
    "UK",
    "EEA",
    "Germany",
    "France",
    "Netherlands",
    "Ireland",
];

/// A composite predicate computed over the full organization profile.
pub type PredicateFn = Arc<dyn Fn(&OrganizationProfile) -> bool + Send + Sync>;

/// Registry of named composite predicates.
///
/// Rule triggers reference predicates by name; the registry is the single
/// source of truth for which names exist. Lookup never silently defaults —
/// [`PredicateRegistry::evaluate`] returns `None` for an unknown name so the
/// caller can fail loud.
#[derive(Clone)]
pub struct PredicateRegistry {
    predicates: HashMap<String, PredicateFn>,
}

impl PredicateRegistry {
    /// Create an empty registry. Useful for tests that supply their own
    /// predicates.
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Create a registry with the three built-in composite conditions:
    /// `any_eu_data_processing`, `handles_financial_transactions`, and
    /// `fca_regulated`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("any_eu_data_processing", any_eu_data_processing);
        registry.register(
            "handles_financial_transactions",
            handles_financial_transactions,
        );
        registry.register("fca_regulated", fca_regulated);
        registry
    }

    /// Register a predicate under a name, replacing any existing entry.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&OrganizationProfile) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Whether a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Evaluate the named predicate over a profile.
    ///
    /// Returns `None` if no predicate is registered under `name` — callers
    /// must treat that as an error, never as vacuous truth.
    pub fn evaluate(&self, name: &str, profile: &OrganizationProfile) -> Option<bool> {
        self.predicates.get(name).map(|p| p(profile))
    }

    /// Registered predicate names, sorted for stable error messages.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the registry has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// True if any system location falls in [`EU_JURISDICTIONS`] OR the profile
/// handles `personal_data`.
///
/// The data-type branch is a deliberately broad policy: any personal-data
/// handling is treated as potential EU exposure regardless of declared
/// location, so a profile with no EU systems but personal data still
/// triggers EU-scoped rules.
pub fn any_eu_data_processing(profile: &OrganizationProfile) -> bool {
    profile
        .system_locations
        .iter()
        .any(|loc| EU_JURISDICTIONS.contains(&loc.as_str()))
        || profile.has_data_type("personal_data")
}

/// True if the profile handles `financial_data` OR operates in a
/// financial-adjacent sector (financial, banking, payment_services).
pub fn handles_financial_transactions(profile: &OrganizationProfile) -> bool {
    profile.has_data_type("financial_data")
        || profile.has_sector("financial")
        || profile.has_sector("banking")
        || profile.has_sector("payment_services")
}

/// True if systems reside in the UK AND the profile operates in the
/// financial or banking sector.
pub fn fca_regulated(profile: &OrganizationProfile) -> bool {
    profile.has_location("UK") && (profile.has_sector("financial") || profile.has_sector("banking"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regscope_core::CompanySize;

    fn profile(
        sectors: &[&str],
        data_types: &[&str],
        locations: &[&str],
    ) -> OrganizationProfile {
        let mut p = OrganizationProfile::with_size(CompanySize::Sme);
        p.sectors = sectors.iter().map(|s| s.to_string()).collect();
        p.data_types = data_types.iter().map(|s| s.to_string()).collect();
        p.system_locations = locations.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn eu_processing_via_location() {
        assert!(any_eu_data_processing(&profile(&[], &[], &["Germany"])));
        assert!(any_eu_data_processing(&profile(&[], &[], &["EU", "US"])));
    }

    #[test]
    fn eu_processing_via_personal_data_despite_us_location() {
        // The data-type branch fires even with no EU location.
        assert!(any_eu_data_processing(&profile(
            &[],
            &["personal_data"],
            &["US"]
        )));
    }

    #[test]
    fn eu_processing_false_without_either_branch() {
        assert!(!any_eu_data_processing(&profile(
            &["technology"],
            &["customer_data"],
            &["US"]
        )));
        assert!(!any_eu_data_processing(&profile(&[], &[], &[])));
    }

    #[test]
    fn financial_via_data_type_branch() {
        // Sector does not match, data type does.
        assert!(handles_financial_transactions(&profile(
            &["technology"],
            &["financial_data"],
            &[]
        )));
    }

    #[test]
    fn financial_via_sector_branch() {
        assert!(handles_financial_transactions(&profile(
            &["payment_services"],
            &[],
            &[]
        )));
        assert!(!handles_financial_transactions(&profile(
            &["retail"],
            &["customer_data"],
            &[]
        )));
    }

    #[test]
    fn fca_requires_uk_and_financial_sector() {
        assert!(fca_regulated(&profile(&["financial"], &[], &["UK"])));
        assert!(fca_regulated(&profile(&["banking"], &[], &["UK", "US"])));
        // Same sector, wrong jurisdiction.
        assert!(!fca_regulated(&profile(&["financial"], &[], &["US"])));
        // Right jurisdiction, wrong sector.
        assert!(!fca_regulated(&profile(&["retail"], &[], &["UK"])));
    }

    #[test]
    fn builtin_registry_contains_all_three() {
        let registry = PredicateRegistry::builtin();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("any_eu_data_processing"));
        assert!(registry.contains("handles_financial_transactions"));
        assert!(registry.contains("fca_regulated"));
        assert!(!registry.contains("gdpr_article_9"));
    }

    #[test]
    fn evaluate_unknown_name_returns_none() {
        let registry = PredicateRegistry::builtin();
        let p = profile(&[], &[], &[]);
        assert_eq!(registry.evaluate("not_a_condition", &p), None);
    }

    #[test]
    fn registry_is_extensible() {
        let mut registry = PredicateRegistry::builtin();
        registry.register("is_public_sector", |p: &OrganizationProfile| {
            p.is_public_sector
        });
        assert_eq!(registry.len(), 4);

        let mut p = profile(&[], &[], &[]);
        p.is_public_sector = true;
        assert_eq!(registry.evaluate("is_public_sector", &p), Some(true));
    }

    #[test]
    fn names_are_sorted() {
        let registry = PredicateRegistry::builtin();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
