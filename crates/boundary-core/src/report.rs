//! # Report Module
//!
//! Aggregated view of one resolution run, for the CLI and the HTTP API.

use crate::boundary::BoundaryResolver;
use crate::types::{BoundaryResult, BuildingSpace, Responsibility, SystemInstance};
use serde::{Deserialize, Serialize};

/// Number of systems per responsibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibilityCounts {
    pub tenant: usize,
    pub landlord: usize,
    pub shared: usize,
    pub out_of_scope: usize,
}

impl ResponsibilityCounts {
    /// Tally a result list.
    #[must_use]
    pub fn tally(results: &[BoundaryResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            *counts.slot(result.responsibility) += 1;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, responsibility: Responsibility) -> usize {
        match responsibility {
            Responsibility::Tenant => self.tenant,
            Responsibility::Landlord => self.landlord,
            Responsibility::Shared => self.shared,
            Responsibility::OutOfScope => self.out_of_scope,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.tenant + self.landlord + self.shared + self.out_of_scope
    }

    fn slot(&mut self, responsibility: Responsibility) -> &mut usize {
        match responsibility {
            Responsibility::Tenant => &mut self.tenant,
            Responsibility::Landlord => &mut self.landlord,
            Responsibility::Shared => &mut self.shared,
            Responsibility::OutOfScope => &mut self.out_of_scope,
        }
    }
}

/// Results of resolving a property's systems for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryReport {
    pub tenant_account_id: String,
    /// Number of spaces that counted as the tenant's in-scope spaces.
    pub in_scope_spaces: usize,
    pub counts: ResponsibilityCounts,
    pub results: Vec<BoundaryResult>,
}

impl BoundaryReport {
    /// Run the resolver and collect the report.
    #[must_use]
    pub fn build(
        systems: &[SystemInstance],
        spaces: &[BuildingSpace],
        tenant_account_id: &str,
    ) -> Self {
        let in_scope_spaces = spaces
            .iter()
            .filter(|space| space.is_tenant_in_scope_for(tenant_account_id))
            .count();
        let results = BoundaryResolver::resolve(systems, spaces, tenant_account_id);
        Self {
            tenant_account_id: tenant_account_id.to_string(),
            in_scope_spaces,
            counts: ResponsibilityCounts::tally(&results),
            results,
        }
    }

    /// Plain-text table for terminal output.
    #[must_use]
    pub fn to_text(&self) -> String {
        let id_width = self
            .results
            .iter()
            .map(|r| r.system_id.len())
            .max()
            .unwrap_or(0)
            .max("SYSTEM".len());

        let mut output = String::new();
        output.push_str(&format!(
            "Tenant {} ({} in-scope spaces)\n\n",
            self.tenant_account_id, self.in_scope_spaces
        ));
        output.push_str(&format!(
            "{:<id_width$}  {:<10}  REASONING\n",
            "SYSTEM", "VERDICT"
        ));

        if self.results.is_empty() {
            output.push_str("(no systems)\n");
        }
        for result in &self.results {
            output.push_str(&format!(
                "{:<id_width$}  {:<10}  {}\n",
                result.system_id,
                result.responsibility.as_str(),
                result.reasoning
            ));
        }

        output.push('\n');
        let summary: Vec<String> = Responsibility::ALL
            .iter()
            .map(|r| format!("{}: {}", r, self.counts.get(*r)))
            .collect();
        output.push_str(&summary.join(", "));
        output.push('\n');
        output
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_BUILDING;

    fn sample() -> BoundaryReport {
        let spaces = vec![
            BuildingSpace::tenant("T1", "acme", true),
            BuildingSpace::tenant("T2", "acme", true),
            BuildingSpace::tenant("G1", "globex", true),
        ];
        let systems = vec![
            SystemInstance::new("AHU-1", "Tenant").serving(["T1"]),
            SystemInstance::new("CHW-LOOP", "Landlord").serving([BASE_BUILDING, "T2"]),
            SystemInstance::new("PANEL-G", "Tenant").serving(["G1"]),
            SystemInstance::new("VAV-7", "Landlord").serving(["T2"]).allocated("direct"),
        ];
        BoundaryReport::build(&systems, &spaces, "acme")
    }

    #[test]
    fn counts_match_results() {
        let report = sample();

        assert_eq!(report.in_scope_spaces, 2);
        assert_eq!(report.counts.tenant, 1);
        assert_eq!(report.counts.landlord, 1);
        assert_eq!(report.counts.shared, 1);
        assert_eq!(report.counts.out_of_scope, 1);
        assert_eq!(report.counts.total(), report.results.len());
    }

    #[test]
    fn text_lists_every_system() {
        let text = sample().to_text();

        assert!(text.contains("Tenant acme (2 in-scope spaces)"));
        assert!(text.contains("AHU-1"));
        assert!(text.contains("CHW-LOOP"));
        assert!(text.contains("OutOfScope"));
        assert!(text.contains("Tenant: 1, Landlord: 1, Shared: 1, OutOfScope: 1"));
    }

    #[test]
    fn empty_report_text() {
        let report = BoundaryReport::build(&[], &[], "acme");
        assert!(report.to_text().contains("(no systems)"));
        assert_eq!(report.counts, ResponsibilityCounts::default());
    }
}
