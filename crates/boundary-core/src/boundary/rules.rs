//! Ordered boundary rules.
//!
//! Rules overlap, so their order is the tie-break. The table is evaluated
//! top to bottom and the first rule whose predicate holds decides the
//! verdict. [`FALLBACK_RULE`] matches unconditionally and always comes last.

use crate::types::{Controller, Responsibility, SystemInstance};
use std::fmt;

/// Per-system inputs to the rule predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemFacts<'a> {
    pub controlled_by: &'a Controller,
    pub serves_base_building: bool,
    pub serves_tenant_spaces: bool,
    pub direct_allocation: bool,
}

impl<'a> SystemFacts<'a> {
    /// Facts for a system whose tenant-space intersection is already known.
    #[must_use]
    pub fn new(system: &'a SystemInstance, serves_tenant_spaces: bool) -> Self {
        Self {
            controlled_by: &system.controlled_by,
            serves_base_building: system.serves_base_building(),
            serves_tenant_spaces,
            direct_allocation: system.is_direct_allocation(),
        }
    }

    fn is_tenant_controlled(&self) -> bool {
        *self.controlled_by == Controller::Tenant
    }

    fn is_landlord_controlled(&self) -> bool {
        *self.controlled_by == Controller::Landlord
    }
}

/// One row of the rule table.
#[derive(Clone, Copy)]
pub struct BoundaryRule {
    /// Stable identifier, used in explanations and logs.
    pub name: &'static str,
    pub applies: fn(&SystemFacts<'_>) -> bool,
    pub responsibility: Responsibility,
    pub reasoning: &'static str,
}

impl fmt::Debug for BoundaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryRule")
            .field("name", &self.name)
            .field("responsibility", &self.responsibility)
            .finish()
    }
}

impl BoundaryRule {
    #[must_use]
    pub fn matches(&self, facts: &SystemFacts<'_>) -> bool {
        (self.applies)(facts)
    }
}

fn serves_nothing_in_scope(facts: &SystemFacts<'_>) -> bool {
    !facts.serves_base_building && !facts.serves_tenant_spaces
}

fn tenant_controlled_tenant_spaces(facts: &SystemFacts<'_>) -> bool {
    facts.is_tenant_controlled() && facts.serves_tenant_spaces
}

// Does not require `!serves_tenant_spaces`: a landlord system touching the
// base building stays Landlord even when it also reaches tenant spaces.
fn landlord_controlled_base_building(facts: &SystemFacts<'_>) -> bool {
    facts.is_landlord_controlled() && facts.serves_base_building
}

fn landlord_controlled_allocated(facts: &SystemFacts<'_>) -> bool {
    facts.is_landlord_controlled() && facts.serves_tenant_spaces && !facts.direct_allocation
}

fn always(_: &SystemFacts<'_>) -> bool {
    true
}

/// Rules 1-4, in precedence order.
pub static BOUNDARY_RULES: [BoundaryRule; 4] = [
    BoundaryRule {
        name: "out_of_scope",
        applies: serves_nothing_in_scope,
        responsibility: Responsibility::OutOfScope,
        reasoning: "System does not serve any tenant-controlled or in-scope spaces.",
    },
    BoundaryRule {
        name: "tenant_controlled",
        applies: tenant_controlled_tenant_spaces,
        responsibility: Responsibility::Tenant,
        reasoning: "System is tenant-controlled and serves only tenant spaces.",
    },
    BoundaryRule {
        name: "landlord_base_building",
        applies: landlord_controlled_base_building,
        responsibility: Responsibility::Landlord,
        reasoning: "System is landlord-controlled and serves base building/common areas.",
    },
    BoundaryRule {
        name: "landlord_allocated",
        applies: landlord_controlled_allocated,
        responsibility: Responsibility::Shared,
        reasoning: "Landlord-controlled system serves tenant spaces but requires allocation.",
    },
];

/// Rule 5: taken when nothing in [`BOUNDARY_RULES`] matched.
pub static FALLBACK_RULE: BoundaryRule = BoundaryRule {
    name: "mixed_scope",
    applies: always,
    responsibility: Responsibility::Shared,
    reasoning: "System spans landlord and tenant scope or has mixed control.",
};

// =============================================================================
// TESTS
// =============================================================================
