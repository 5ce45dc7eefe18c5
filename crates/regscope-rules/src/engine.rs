//! # Rules Engine — Deterministic Fan-Out Evaluation
//!
//! Evaluates an [`OrganizationProfile`] against every rule in a
//! [`RuleTable`] and unions the matched rules' regulatory implications.
//! This is a fan-out classifier, not a first-match-wins dispatcher: a
//! profile may legitimately trigger many rules at once (GDPR by
//! jurisdiction and ISO 27001 by data type, say), and every matching rule
//! contributes.
//!
//! ## Invariants
//!
//! - **Pure**: evaluation reads the profile and the table, touches no other
//!   state, and uses no clock or randomness. Identical inputs always yield
//!   identical output, including `matched_rule_ids` order.
//! - **Monotonic**: appending a rule to the table can only add to the
//!   result sets, never remove a previously granted entry.
//! - **Infallible**: zero matches is a valid outcome (empty result, empty
//!   rationale), not an error. Malformed tables are rejected at
//!   construction, not at evaluation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use regscope_core::{OrganizationProfile, RuleId};

use crate::error::RulesResult;
use crate::loader;
use crate::predicate::PredicateRegistry;
use crate::rule::{RuleTable, ScopeOptions};

/// Aggregated output of one evaluation pass.
///
/// The three code sets are deduplicated unions over all matched rules;
/// `rationale` maps each matched rule id to its justification string;
/// `matched_rule_ids` preserves table order for audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Applicable jurisdiction codes.
    pub jurisdictions: BTreeSet<String>,
    /// Relevant regulator names.
    pub regulators: BTreeSet<String>,
    /// Required framework codes.
    pub frameworks: BTreeSet<String>,
    /// Justification per matched rule, keyed by rule id.
    pub rationale: BTreeMap<RuleId, String>,
    /// Matched rule ids in table order.
    pub matched_rule_ids: Vec<RuleId>,
}

impl EvaluationResult {
    /// Whether no rule matched. A valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.matched_rule_ids.is_empty()
    }
}

/// The rule evaluator: an immutable table plus the predicate registry its
/// composite conditions resolve against.
///
/// Construction validates the pairing — every condition name in the table
/// must exist in the registry — so [`RulesEngine::evaluate`] cannot fail.
/// The engine holds both by value; callers wanting multiple tables (tenant
/// tables, fixture tables) simply construct multiple engines.
#[derive(Debug, Clone)]
pub struct RulesEngine {
    table: RuleTable,
    predicates: PredicateRegistry,
}

impl RulesEngine {
    /// Build an engine from a table and a predicate registry.
    ///
    /// # Errors
    ///
    /// Fails fast if the table is structurally invalid (empty or duplicate
    /// rule ids) or references a condition name missing from the registry.
    pub fn new(table: RuleTable, predicates: PredicateRegistry) -> RulesResult<Self> {
        table.validate_structure()?;
        table.validate_conditions(&predicates)?;
        tracing::debug!(
            rules = table.len(),
            predicates = predicates.len(),
            "rules engine constructed"
        );
        Ok(Self { table, predicates })
    }

    /// Build an engine from the bundled rule table and the builtin
    /// predicate registry.
    pub fn with_builtin_rules() -> RulesResult<Self> {
        Self::new(loader::builtin_table()?, PredicateRegistry::builtin())
    }

    /// The table this engine evaluates against.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// The questionnaire lookup lists carried by the table.
    pub fn options(&self) -> ScopeOptions {
        self.table.options()
    }

    /// Evaluate a profile against every rule in table order.
    ///
    /// Matching continues past each match (fan-out), unioning result codes
    /// into deduplicated sets and recording each matched rule's rationale
    /// under its id. Empty profile fields simply fail the clauses that
    /// require them; they never error.
    pub fn evaluate(&self, profile: &OrganizationProfile) -> EvaluationResult {
        let mut result = EvaluationResult::default();

        for rule in self.table.iter() {
            if !rule.triggers.matches(profile, &self.predicates) {
                continue;
            }

            tracing::debug!(rule = %rule.id, "rule matched");

            result
                .jurisdictions
                .extend(rule.results.jurisdictions.iter().cloned());
            result
                .regulators
                .extend(rule.results.regulators.iter().cloned());
            result
                .frameworks
                .extend(rule.results.frameworks.iter().cloned());
            result
                .rationale
                .insert(rule.id.clone(), rule.rationale.clone());
            result.matched_rule_ids.push(rule.id.clone());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Rule, RuleResults, RuleTriggers};
    use regscope_core::CompanySize;
    use std::collections::BTreeMap;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn rule(id: &str, triggers: RuleTriggers, frameworks: &[&str]) -> Rule {
        Rule {
            id: RuleId::new(id).unwrap(),
            name: id.to_uppercase(),
            triggers,
            results: RuleResults {
                jurisdictions: Vec::new(),
                regulators: Vec::new(),
                frameworks: strings(frameworks),
            },
            rationale: format!("{id} applies"),
        }
    }

    fn sector_rule(id: &str, sector: &str, frameworks: &[&str]) -> Rule {
        rule(
            id,
            RuleTriggers {
                sectors: Some(strings(&[sector])),
                ..RuleTriggers::default()
            },
            frameworks,
        )
    }

    fn tech_profile() -> OrganizationProfile {
        let mut p = OrganizationProfile::with_size(CompanySize::Sme);
        p.sectors = strings(&["technology"]);
        p
    }

    #[test]
    fn construction_rejects_unknown_condition() {
        let mut conditions = BTreeMap::new();
        conditions.insert("martian_law".to_string(), true);
        let table = RuleTable::from_rules(vec![rule(
            "mars",
            RuleTriggers {
                conditions: Some(conditions),
                ..RuleTriggers::default()
            },
            &["MARS_ACT"],
        )]);
        assert!(RulesEngine::new(table, PredicateRegistry::builtin()).is_err());
    }

    #[test]
    fn construction_rejects_duplicate_ids() {
        let table = RuleTable::from_rules(vec![
            sector_rule("dup", "technology", &["A"]),
            sector_rule("dup", "energy", &["B"]),
        ]);
        assert!(RulesEngine::new(table, PredicateRegistry::builtin()).is_err());
    }

    #[test]
    fn zero_matches_is_valid_empty_result() {
        let table = RuleTable::from_rules(vec![sector_rule("energy_only", "energy", &["NIS2"])]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();
        let result = engine.evaluate(&tech_profile());
        assert!(result.is_empty());
        assert!(result.frameworks.is_empty());
        assert!(result.jurisdictions.is_empty());
        assert!(result.regulators.is_empty());
        assert!(result.rationale.is_empty());
    }

    #[test]
    fn empty_table_yields_empty_result() {
        let engine =
            RulesEngine::new(RuleTable::default(), PredicateRegistry::builtin()).unwrap();
        assert!(engine.evaluate(&tech_profile()).is_empty());
    }

    #[test]
    fn fan_out_collects_all_matching_rules() {
        let table = RuleTable::from_rules(vec![
            sector_rule("first", "technology", &["A"]),
            sector_rule("skipped", "energy", &["B"]),
            sector_rule("second", "technology", &["C"]),
        ]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();
        let result = engine.evaluate(&tech_profile());

        assert_eq!(
            result.matched_rule_ids,
            vec![RuleId::new("first").unwrap(), RuleId::new("second").unwrap()]
        );
        assert!(result.frameworks.contains("A"));
        assert!(!result.frameworks.contains("B"));
        assert!(result.frameworks.contains("C"));
        assert_eq!(result.rationale.len(), 2);
        assert_eq!(
            result.rationale[&RuleId::new("first").unwrap()],
            "first applies"
        );
    }

    #[test]
    fn matched_ids_preserve_table_order_not_lexical_order() {
        let table = RuleTable::from_rules(vec![
            sector_rule("zulu", "technology", &["Z"]),
            sector_rule("alpha", "technology", &["A"]),
        ]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();
        let result = engine.evaluate(&tech_profile());
        assert_eq!(
            result.matched_rule_ids,
            vec![RuleId::new("zulu").unwrap(), RuleId::new("alpha").unwrap()]
        );
    }

    #[test]
    fn duplicate_result_codes_are_deduplicated() {
        let table = RuleTable::from_rules(vec![
            sector_rule("one", "technology", &["ISO27001", "ISO27001"]),
            sector_rule("two", "technology", &["ISO27001"]),
        ]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();
        let result = engine.evaluate(&tech_profile());
        assert_eq!(result.frameworks.len(), 1);
        assert_eq!(result.matched_rule_ids.len(), 2);
    }

    #[test]
    fn duplicate_profile_codes_do_not_change_output() {
        let table = RuleTable::from_rules(vec![sector_rule("t", "technology", &["SOC2"])]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();

        let mut noisy = tech_profile();
        noisy.sectors = strings(&["technology", "technology", "technology"]);

        assert_eq!(engine.evaluate(&noisy), engine.evaluate(&tech_profile()));
    }

    #[test]
    fn vacuous_rule_matches_fully_empty_profile() {
        let table = RuleTable::from_rules(vec![rule(
            "baseline",
            RuleTriggers::default(),
            &["Data_Protection_Basics"],
        )]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();
        let result = engine.evaluate(&OrganizationProfile::with_size(CompanySize::Startup));
        assert!(result.frameworks.contains("Data_Protection_Basics"));
    }

    #[test]
    fn results_can_exceed_profile_input() {
        // A rule may add jurisdictions the user never selected.
        let table = RuleTable::from_rules(vec![Rule {
            id: RuleId::new("de_implies_eu").unwrap(),
            name: "Germany implies EU".to_string(),
            triggers: RuleTriggers {
                jurisdictions: Some(strings(&["Germany"])),
                ..RuleTriggers::default()
            },
            results: RuleResults {
                jurisdictions: strings(&["EU", "Germany"]),
                regulators: strings(&["EDPB", "BfDI"]),
                frameworks: strings(&["GDPR"]),
            },
            rationale: "Systems in Germany imply EU regulatory reach".to_string(),
        }]);
        let engine = RulesEngine::new(table, PredicateRegistry::builtin()).unwrap();

        let mut p = OrganizationProfile::with_size(CompanySize::Sme);
        p.system_locations = strings(&["Germany"]);
        let result = engine.evaluate(&p);
        assert!(result.jurisdictions.contains("EU"));
        assert!(result.regulators.contains("BfDI"));
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let engine = RulesEngine::with_builtin_rules().unwrap();
        let mut p = tech_profile();
        p.data_types = strings(&["personal_data"]);
        p.system_locations = strings(&["EU"]);

        let first = engine.evaluate(&p);
        for _ in 0..10 {
            assert_eq!(engine.evaluate(&p), first);
        }
    }

    #[test]
    fn engines_with_different_tables_coexist() {
        let a = RulesEngine::new(
            RuleTable::from_rules(vec![sector_rule("a", "technology", &["A"])]),
            PredicateRegistry::builtin(),
        )
        .unwrap();
        let b = RulesEngine::new(
            RuleTable::from_rules(vec![sector_rule("b", "technology", &["B"])]),
            PredicateRegistry::builtin(),
        )
        .unwrap();

        let p = tech_profile();
        assert!(a.evaluate(&p).frameworks.contains("A"));
        assert!(b.evaluate(&p).frameworks.contains("B"));
        assert!(!a.evaluate(&p).frameworks.contains("B"));
    }

    #[test]
    fn result_serializes_with_sorted_sets() {
        let engine = RulesEngine::with_builtin_rules().unwrap();
        let mut p = tech_profile();
        p.data_types = strings(&["personal_data"]);
        let json = serde_json::to_string(&engine.evaluate(&p)).unwrap();
        let back: EvaluationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.evaluate(&p));
    }
}
