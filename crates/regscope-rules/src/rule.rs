//! # Rule Table — Declarative Regulatory Scoping Rules
//!
//! Data model for the rule table: each [`Rule`] pairs a conjunctive
//! [`RuleTriggers`] predicate with a [`RuleResults`] payload and a
//! human-readable rationale. The table also carries the questionnaire
//! lookup lists ([`ScopeOptions`]) used to populate the scoping form.
//!
//! ## Matching Semantics
//!
//! A rule's triggers form a conjunction of optional clauses; each present
//! field clause is an OR-match (set intersection) against the profile's
//! corresponding field, and each entry under `conditions` requires a named
//! composite predicate to equal its declared boolean. Absent clauses are
//! vacuously true, so a rule with no triggers at all matches every profile.
//!
//! ## Invariant
//!
//! The table is read-only at evaluation time and declaration order is
//! preserved end to end — matched-rule output is reported in table order.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use regscope_core::{CompanySize, OrganizationProfile, RuleId};

use crate::error::{RulesError, RulesResult};
use crate::predicate::PredicateRegistry;

/// Conjunctive trigger clauses for a rule.
///
/// Every field is optional; an absent field does not constrain the match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTriggers {
    /// Match if the profile's sectors intersect this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<String>>,
    /// Match if the profile's system locations intersect this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdictions: Option<Vec<String>>,
    /// Match if the profile's data types intersect this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_types: Option<Vec<String>>,
    /// Match if the profile's company size is a member of this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<Vec<CompanySize>>,
    /// Named composite conditions and their expected boolean values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<BTreeMap<String, bool>>,
}

impl RuleTriggers {
    /// Whether this trigger set has no clauses at all (matches everything).
    pub fn is_vacuous(&self) -> bool {
        self.sectors.is_none()
            && self.jurisdictions.is_none()
            && self.data_types.is_none()
            && self.company_size.is_none()
            && self.conditions.is_none()
    }

    /// Evaluate the conjunction of all present clauses against a profile.
    ///
    /// Composite conditions are looked up in `predicates`. A condition name
    /// missing from the registry makes the rule non-matching and logs an
    /// error — it is never treated as vacuously true. Tables validated via
    /// [`RuleTable::validate_conditions`] cannot reach that branch.
    pub fn matches(&self, profile: &OrganizationProfile, predicates: &PredicateRegistry) -> bool {
        if let Some(ref sectors) = self.sectors {
            if !intersects(sectors, &profile.sectors) {
                return false;
            }
        }

        if let Some(ref jurisdictions) = self.jurisdictions {
            if !intersects(jurisdictions, &profile.system_locations) {
                return false;
            }
        }

        if let Some(ref data_types) = self.data_types {
            if !intersects(data_types, &profile.data_types) {
                return false;
            }
        }

        if let Some(ref sizes) = self.company_size {
            if !sizes.contains(&profile.company_size) {
                return false;
            }
        }

        if let Some(ref conditions) = self.conditions {
            for (name, expected) in conditions {
                match predicates.evaluate(name, profile) {
                    Some(actual) => {
                        if actual != *expected {
                            return false;
                        }
                    }
                    None => {
                        tracing::error!(
                            condition = %name,
                            "condition missing from predicate registry; treating rule as non-matching"
                        );
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// Treat both lists as sets and test for a non-empty intersection.
fn intersects(allowed: &[String], present: &[String]) -> bool {
    present.iter().any(|p| allowed.iter().any(|a| a == p))
}

/// Result payload emitted when a rule matches.
///
/// Not constrained to the profile's input — a rule can add jurisdictions or
/// regulators the user did not explicitly select (e.g. inferring EU
/// regulatory reach from a Germany system location). The table is the
/// authority on regulatory reach, not a passthrough of user input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleResults {
    /// Jurisdiction codes implied by this rule.
    #[serde(default)]
    pub jurisdictions: Vec<String>,
    /// Regulator names implied by this rule.
    #[serde(default)]
    pub regulators: Vec<String>,
    /// Framework codes implied by this rule.
    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// A single regulatory scoping rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier, stable across evaluations. Keys the rationale map.
    pub id: RuleId,
    /// Human-readable rule title. Not used in matching.
    pub name: String,
    /// Conjunctive trigger clauses. Defaults to vacuous (match everything).
    #[serde(default)]
    pub triggers: RuleTriggers,
    /// Payload emitted when the rule matches.
    pub results: RuleResults,
    /// Human-readable justification surfaced to the end user.
    pub rationale: String,
}

/// Questionnaire lookup lists carried alongside the rules.
///
/// Populates the scoping form's sector/data-type/jurisdiction selectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeOptions {
    /// Available sector codes.
    pub sectors: Vec<String>,
    /// Available data-category codes.
    pub data_types: Vec<String>,
    /// Available jurisdiction codes.
    pub jurisdictions: Vec<String>,
}

/// An ordered, immutable collection of scoping rules plus questionnaire
/// lookup lists.
///
/// Declaration order is load-bearing for audit output ordering and is
/// preserved by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
    /// Sector codes for the questionnaire UI.
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Data-category codes for the questionnaire UI.
    #[serde(default)]
    pub data_types: Vec<String>,
    /// Jurisdiction codes for the questionnaire UI.
    #[serde(default)]
    pub jurisdictions: Vec<String>,
}

impl RuleTable {
    /// Create a table from rules only, with empty lookup lists.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Clone out the questionnaire lookup lists.
    pub fn options(&self) -> ScopeOptions {
        ScopeOptions {
            sectors: self.sectors.clone(),
            data_types: self.data_types.clone(),
            jurisdictions: self.jurisdictions.clone(),
        }
    }

    /// Structural validation: every rule id well-formed and unique.
    ///
    /// Rejects the whole table on the first violation — a partially valid
    /// table is never accepted.
    pub fn validate_structure(&self) -> RulesResult<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.rules.len());
        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.id.is_well_formed() {
                return Err(RulesError::InvalidRuleId {
                    index,
                    id: rule.id.as_str().to_string(),
                });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RulesError::DuplicateRuleId {
                    rule_id: rule.id.as_str().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validate that every composite-condition name referenced by a rule is
    /// present in the predicate registry.
    ///
    /// An unknown name rejects the whole table with an error identifying the
    /// offending rule and condition.
    pub fn validate_conditions(&self, predicates: &PredicateRegistry) -> RulesResult<()> {
        for rule in &self.rules {
            if let Some(ref conditions) = rule.triggers.conditions {
                for name in conditions.keys() {
                    if !predicates.contains(name) {
                        return Err(RulesError::UnknownCondition {
                            rule_id: rule.id.as_str().to_string(),
                            condition: name.clone(),
                            known: predicates.names().join(", "),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
