//! The boundary resolver.
//!
//! Pure and synchronous. The tenant in-scope set is rebuilt on every call
//! and dropped afterwards; nothing is cached between calls.

use super::rules::{BOUNDARY_RULES, BoundaryRule, FALLBACK_RULE, SystemFacts};
use crate::types::{BoundaryResult, BuildingSpace, SystemInstance};
use std::collections::BTreeSet;

/// Ids of the spaces that count toward one tenant's boundary.
///
/// Borrows the ids from the space list it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantScope<'a> {
    space_ids: BTreeSet<&'a str>,
}

impl<'a> TenantScope<'a> {
    /// Keep the tenant-class spaces owned by `tenant_account_id` that are
    /// flagged in scope.
    #[must_use]
    pub fn build(spaces: &'a [BuildingSpace], tenant_account_id: &str) -> Self {
        let space_ids = spaces
            .iter()
            .filter(|space| space.is_tenant_in_scope_for(tenant_account_id))
            .map(|space| space.id.as_str())
            .collect();
        Self { space_ids }
    }

    #[must_use]
    pub fn contains(&self, space_id: &str) -> bool {
        self.space_ids.contains(space_id)
    }

    /// Whether any of `served` is in this scope. Unknown ids never match.
    #[must_use]
    pub fn intersects(&self, served: &[String]) -> bool {
        served.iter().any(|id| self.contains(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.space_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.space_ids.is_empty()
    }
}

/// A verdict together with what produced it.
#[derive(Debug, Clone, Copy)]
pub struct Explanation<'a> {
    pub system: &'a SystemInstance,
    pub facts: SystemFacts<'a>,
    pub rule: BoundaryRule,
}

impl Explanation<'_> {
    #[must_use]
    pub fn result(&self) -> BoundaryResult {
        BoundaryResult {
            system_id: self.system.id.clone(),
            responsibility: self.rule.responsibility,
            reasoning: self.rule.reasoning.to_string(),
        }
    }
}

/// Maps systems to responsibility verdicts.
///
/// Total and deterministic: every system gets exactly one result, in input
/// order, and identical inputs give identical output.
pub struct BoundaryResolver;

impl BoundaryResolver {
    /// The full rule table in evaluation order, fallback last.
    pub fn rules() -> impl Iterator<Item = &'static BoundaryRule> {
        BOUNDARY_RULES.iter().chain(std::iter::once(&FALLBACK_RULE))
    }

    /// The first rule matching `facts`.
    #[must_use]
    pub fn classify(facts: &SystemFacts<'_>) -> BoundaryRule {
        BOUNDARY_RULES
            .iter()
            .find(|rule| rule.matches(facts))
            .copied()
            .unwrap_or(FALLBACK_RULE)
    }

    /// Resolve one system against an already-built tenant scope.
    #[must_use]
    pub fn explain<'a>(system: &'a SystemInstance, scope: &TenantScope<'_>) -> Explanation<'a> {
        let facts = SystemFacts::new(system, scope.intersects(&system.serves_spaces));
        Explanation {
            system,
            facts,
            rule: Self::classify(&facts),
        }
    }

    /// Resolve every system for `tenant_account_id`.
    #[must_use]
    pub fn resolve(
        systems: &[SystemInstance],
        spaces: &[BuildingSpace],
        tenant_account_id: &str,
    ) -> Vec<BoundaryResult> {
        let scope = TenantScope::build(spaces, tenant_account_id);
        systems
            .iter()
            .map(|system| Self::explain(system, &scope).result())
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BASE_BUILDING, Responsibility};

    const TENANT: &str = "acme";

    fn spaces() -> Vec<BuildingSpace> {
        vec![
            BuildingSpace::tenant("T1", TENANT, true),
            BuildingSpace::tenant("T2", TENANT, false),
            BuildingSpace::tenant("G1", "globex", true),
            BuildingSpace::new("C1", "common"),
        ]
    }

    fn resolve_one(system: SystemInstance) -> BoundaryResult {
        let mut results = BoundaryResolver::resolve(&[system], &spaces(), TENANT);
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[test]
    fn scope_filters_by_class_owner_and_flag() {
        let spaces = spaces();
        let scope = TenantScope::build(&spaces, TENANT);

        assert_eq!(scope.len(), 1);
        assert!(scope.contains("T1"));
        assert!(!scope.contains("T2"));
        assert!(!scope.contains("G1"));
        assert!(!scope.contains("C1"));
    }

    #[test]
    fn tenant_rule_precedes_landlord_rule() {
        let result = resolve_one(SystemInstance::new("S1", "Tenant").serving([BASE_BUILDING, "T1"]));

        assert_eq!(result.responsibility, Responsibility::Tenant);
        assert_eq!(
            result.reasoning,
            "System is tenant-controlled and serves only tenant spaces."
        );
    }

    #[test]
    fn landlord_serving_both_is_landlord() {
        let result = resolve_one(
            SystemInstance::new("S1", "Landlord")
                .serving([BASE_BUILDING, "T1"])
                .allocated("pro_rata"),
        );
        assert_eq!(result.responsibility, Responsibility::Landlord);
    }

    #[test]
    fn empty_serves_spaces_is_out_of_scope() {
        for controller in ["Tenant", "Landlord", "Operator"] {
            let result = resolve_one(SystemInstance::new("S1", controller));
            assert_eq!(result.responsibility, Responsibility::OutOfScope);
            assert_eq!(
                result.reasoning,
                "System does not serve any tenant-controlled or in-scope spaces."
            );
        }
    }

    #[test]
    fn landlord_direct_falls_back_to_shared() {
        let result = resolve_one(
            SystemInstance::new("S1", "Landlord")
                .serving(["T1"])
                .allocated("direct"),
        );

        assert_eq!(result.responsibility, Responsibility::Shared);
        assert_eq!(
            result.reasoning,
            "System spans landlord and tenant scope or has mixed control."
        );
    }

    #[test]
    fn landlord_allocated_is_shared() {
        let result = resolve_one(
            SystemInstance::new("S1", "Landlord")
                .serving(["T1"])
                .allocated("pro_rata"),
        );

        assert_eq!(result.responsibility, Responsibility::Shared);
        assert_eq!(
            result.reasoning,
            "Landlord-controlled system serves tenant spaces but requires allocation."
        );
    }

    #[test]
    fn landlord_without_allocation_method_is_allocated() {
        let result = resolve_one(SystemInstance::new("S1", "Landlord").serving(["T1"]));
        assert_eq!(
            result.reasoning,
            "Landlord-controlled system serves tenant spaces but requires allocation."
        );
    }

    #[test]
    fn other_tenants_space_does_not_count() {
        let result = resolve_one(SystemInstance::new("S1", "Tenant").serving(["G1"]));
        assert_eq!(result.responsibility, Responsibility::OutOfScope);
    }

    #[test]
    fn unknown_ids_and_out_of_scope_spaces_do_not_count() {
        let result = resolve_one(SystemInstance::new("S1", "Tenant").serving(["T2", "ghost", "C1"]));
        assert_eq!(result.responsibility, Responsibility::OutOfScope);
    }

    #[test]
    fn unrecognized_controller_falls_back() {
        let result = resolve_one(SystemInstance::new("S1", "Operator").serving([BASE_BUILDING]));
        assert_eq!(result.responsibility, Responsibility::Shared);

        let result = resolve_one(SystemInstance::new("S1", "Operator").serving(["T1"]));
        assert_eq!(result.responsibility, Responsibility::Shared);
    }

    #[test]
    fn tenant_serving_only_base_building_falls_back() {
        let result = resolve_one(SystemInstance::new("S1", "Tenant").serving([BASE_BUILDING]));
        assert_eq!(result.responsibility, Responsibility::Shared);
    }

    #[test]
    fn duplicates_in_serves_spaces_are_harmless() {
        let result = resolve_one(SystemInstance::new("S1", "Tenant").serving(["T1", "T1", "T1"]));
        assert_eq!(result.responsibility, Responsibility::Tenant);
    }

    #[test]
    fn explain_names_the_matching_rule() {
        let spaces = spaces();
        let scope = TenantScope::build(&spaces, TENANT);
        let system = SystemInstance::new("S1", "Landlord").serving(["T1"]).allocated("direct");

        let explanation = BoundaryResolver::explain(&system, &scope);

        assert_eq!(explanation.rule.name, "mixed_scope");
        assert!(explanation.facts.serves_tenant_spaces);
        assert!(!explanation.facts.serves_base_building);
    }

    #[test]
    fn rules_end_with_fallback() {
        let names: Vec<_> = BoundaryResolver::rules().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "out_of_scope",
                "tenant_controlled",
                "landlord_base_building",
                "landlord_allocated",
                "mixed_scope",
            ]
        );
    }

    #[test]
    fn no_systems_gives_no_results() {
        assert!(BoundaryResolver::resolve(&[], &spaces(), TENANT).is_empty());
    }
}
