//! # Boundary Module
//!
//! Responsibility resolution for building systems.
//!
//! This module contains:
//! - The tenant in-scope space set derived per request
//! - The ordered rule table (data, not control flow)
//! - The resolver that applies it first-match-wins

mod resolver;
mod rules;

pub use resolver::{BoundaryResolver, Explanation, TenantScope};
pub use rules::{BOUNDARY_RULES, BoundaryRule, FALLBACK_RULE, SystemFacts};
