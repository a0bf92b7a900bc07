//! # Types
//!
//! Data model shared by the resolver, the scope store and the app layer.
//!
//! Categorical tags (`spaceClass`, `controlledBy`, `allocationMethod`) are
//! open sets: known values get their own variant, anything else is kept
//! verbatim in `Other` so that round-tripping never loses information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved token in `servesSpaces` standing for base-building/common
/// infrastructure. It is never looked up as a space id.
pub const BASE_BUILDING: &str = "base_building";

// =============================================================================
// CATEGORICAL TAGS
// =============================================================================

/// Classification of a building space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpaceClass {
    Tenant,
    Common,
    BaseBuilding,
    Other(String),
}

impl SpaceClass {
    /// Wire representation of the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tenant => "tenant",
            Self::Common => "common",
            Self::BaseBuilding => "base_building",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for SpaceClass {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "tenant" => Self::Tenant,
            "common" => Self::Common,
            "base_building" => Self::BaseBuilding,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for SpaceClass {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<SpaceClass> for String {
    fn from(class: SpaceClass) -> Self {
        class.as_str().to_string()
    }
}

/// Party that operates a system.
///
/// Tags are case-sensitive: `"tenant"` is not `"Tenant"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Controller {
    Tenant,
    Landlord,
    Other(String),
}

impl Controller {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tenant => "Tenant",
            Self::Landlord => "Landlord",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Controller {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Tenant" => Self::Tenant,
            "Landlord" => Self::Landlord,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Controller {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Controller> for String {
    fn from(controller: Controller) -> Self {
        controller.as_str().to_string()
    }
}

/// How usage or cost of a system is apportioned between parties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AllocationMethod {
    /// Metered or billed straight to one party; nothing to allocate.
    Direct,
    Other(String),
}

impl AllocationMethod {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Direct => "direct",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for AllocationMethod {
    fn from(tag: String) -> Self {
        if tag == "direct" {
            Self::Direct
        } else {
            Self::Other(tag)
        }
    }
}

impl From<&str> for AllocationMethod {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<AllocationMethod> for String {
    fn from(method: AllocationMethod) -> Self {
        method.as_str().to_string()
    }
}

// =============================================================================
// INPUT ENTITIES
// =============================================================================

/// A physical space of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSpace {
    pub id: String,
    pub space_class: SpaceClass,
    /// Owning tenant. Only meaningful for tenant-class spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_account_id: Option<String>,
    #[serde(default)]
    pub in_scope: bool,
}

impl BuildingSpace {
    /// Create a space with no owning tenant, out of scope.
    #[must_use]
    pub fn new(id: impl Into<String>, space_class: impl Into<SpaceClass>) -> Self {
        Self {
            id: id.into(),
            space_class: space_class.into(),
            tenant_account_id: None,
            in_scope: false,
        }
    }

    /// Shorthand for a tenant-class space.
    #[must_use]
    pub fn tenant(id: impl Into<String>, tenant_account_id: impl Into<String>, in_scope: bool) -> Self {
        Self {
            id: id.into(),
            space_class: SpaceClass::Tenant,
            tenant_account_id: Some(tenant_account_id.into()),
            in_scope,
        }
    }

    /// Whether this space counts toward `tenant_account_id`'s boundary.
    #[must_use]
    pub fn is_tenant_in_scope_for(&self, tenant_account_id: &str) -> bool {
        self.space_class == SpaceClass::Tenant
            && self.tenant_account_id.as_deref() == Some(tenant_account_id)
            && self.in_scope
    }
}

/// A building system (HVAC loop, electrical panel, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInstance {
    pub id: String,
    /// Space ids or [`BASE_BUILDING`]. Duplicates allowed.
    #[serde(default)]
    pub serves_spaces: Vec<String>,
    pub controlled_by: Controller,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_method: Option<AllocationMethod>,
}

impl SystemInstance {
    #[must_use]
    pub fn new(id: impl Into<String>, controlled_by: impl Into<Controller>) -> Self {
        Self {
            id: id.into(),
            serves_spaces: Vec::new(),
            controlled_by: controlled_by.into(),
            allocation_method: None,
        }
    }

    /// Builder: set the served space ids.
    #[must_use]
    pub fn serving<I, S>(mut self, spaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.serves_spaces = spaces.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the allocation method.
    #[must_use]
    pub fn allocated(mut self, method: impl Into<AllocationMethod>) -> Self {
        self.allocation_method = Some(method.into());
        self
    }

    #[must_use]
    pub fn serves_base_building(&self) -> bool {
        self.serves_spaces.iter().any(|id| id == BASE_BUILDING)
    }

    /// `true` only for an explicit `"direct"` method; absent is not direct.
    #[must_use]
    pub fn is_direct_allocation(&self) -> bool {
        matches!(self.allocation_method, Some(AllocationMethod::Direct))
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Who bears operational and financial responsibility for a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Responsibility {
    Tenant,
    Landlord,
    Shared,
    OutOfScope,
}

impl Responsibility {
    /// All variants in reporting order.
    pub const ALL: [Self; 4] = [Self::Tenant, Self::Landlord, Self::Shared, Self::OutOfScope];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "Tenant",
            Self::Landlord => "Landlord",
            Self::Shared => "Shared",
            Self::OutOfScope => "OutOfScope",
        }
    }
}

impl fmt::Display for Responsibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryResult {
    pub system_id: String,
    pub responsibility: Responsibility,
    pub reasoning: String,
}

// =============================================================================
// TESTS
// =============================================================================
