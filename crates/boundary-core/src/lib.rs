//! # Boundary Core
//!
//! Deterministic responsibility resolution for building systems.
//!
//! Given the systems of a property, its spaces, and a target tenant, the
//! resolver decides for every system whether it is the tenant's, the
//! landlord's, shared between them, or out of scope. The decision is an
//! ordered rule table evaluated first-match-wins.
//!
//! The crate also owns the tenant floor-scope records that configure which
//! spaces are in scope, and a redb-backed store for them. It never reads the
//! wall clock, performs no async work, and never touches the network.

pub mod boundary;
pub mod error;
pub mod report;
pub mod scope;
pub mod storage;
pub mod types;

pub use boundary::{BoundaryResolver, BoundaryRule, SystemFacts, TenantScope};
pub use error::{ScopeError, StoreError};
pub use report::{BoundaryReport, ResponsibilityCounts};
pub use scope::{ScopeKey, ScopeRecord};
pub use storage::{RedbScopeStore, ScopeStore};
pub use types::{
    AllocationMethod, BASE_BUILDING, BoundaryResult, BuildingSpace, Controller, Responsibility,
    SpaceClass, SystemInstance,
};
