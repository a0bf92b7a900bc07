//! # Scope Module
//!
//! Tenant floor-scope records: the configuration document that decides which
//! of a tenant's spaces take part in boundary resolution.
//!
//! Records are keyed by `(propertyId, tenantAccountId)`. Writes follow set
//! semantics: top-level caller fields overwrite, fields the caller omits are
//! kept. Timestamps are integer milliseconds supplied by the caller; this
//! module never reads a clock.

use crate::error::ScopeError;
use serde_json::{Map, Value};

pub const PROPERTY_ID_FIELD: &str = "propertyId";
pub const TENANT_ACCOUNT_ID_FIELD: &str = "tenantAccountId";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Keys owned by the record itself, never taken from caller fields.
pub const RESERVED_FIELDS: [&str; 4] = [
    PROPERTY_ID_FIELD,
    TENANT_ACCOUNT_ID_FIELD,
    CREATED_AT_FIELD,
    UPDATED_AT_FIELD,
];

// =============================================================================
// KEY
// =============================================================================

/// Validated record key. Both identifiers are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeKey {
    property_id: String,
    tenant_account_id: String,
}

impl ScopeKey {
    pub fn new(
        property_id: impl Into<String>,
        tenant_account_id: impl Into<String>,
    ) -> Result<Self, ScopeError> {
        let property_id = property_id.into();
        let tenant_account_id = tenant_account_id.into();
        if property_id.is_empty() || tenant_account_id.is_empty() {
            return Err(ScopeError::MissingIdentifiers);
        }
        Ok(Self {
            property_id,
            tenant_account_id,
        })
    }

    /// Key from optional identifiers, as they arrive in a query string.
    pub fn from_parts(
        property_id: Option<&str>,
        tenant_account_id: Option<&str>,
    ) -> Result<Self, ScopeError> {
        match (property_id, tenant_account_id) {
            (Some(property_id), Some(tenant_account_id)) => {
                Self::new(property_id, tenant_account_id)
            }
            _ => Err(ScopeError::MissingIdentifiers),
        }
    }

    #[must_use]
    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    #[must_use]
    pub fn tenant_account_id(&self) -> &str {
        &self.tenant_account_id
    }
}

/// Split an upsert document into its key and the fields to set.
///
/// Identifiers must be non-empty JSON strings. Reserved keys are dropped
/// from the returned field set.
pub fn split_document(document: Value) -> Result<(ScopeKey, Map<String, Value>), ScopeError> {
    let Value::Object(mut fields) = document else {
        return Err(ScopeError::NotAnObject);
    };

    let key = ScopeKey::from_parts(
        fields.get(PROPERTY_ID_FIELD).and_then(Value::as_str),
        fields.get(TENANT_ACCOUNT_ID_FIELD).and_then(Value::as_str),
    )?;

    for reserved in RESERVED_FIELDS {
        fields.shift_remove(reserved);
    }

    Ok((key, fields))
}

// =============================================================================
// RECORD
// =============================================================================

/// A stored tenant floor-scope record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRecord {
    pub key: ScopeKey,
    /// Caller-defined fields, reserved keys excluded.
    pub fields: Map<String, Value>,
    /// Milliseconds since the Unix epoch of the first write.
    pub created_at: u64,
    /// Milliseconds since the Unix epoch of the latest write.
    pub updated_at: u64,
}

impl ScopeRecord {
    /// Post-write state of an upsert.
    ///
    /// With no `existing` record this is an insert and `created_at` is
    /// `now_ms`; otherwise `created_at` is kept and `fields` are set onto the
    /// existing ones.
    #[must_use]
    pub fn upserted(
        existing: Option<Self>,
        key: ScopeKey,
        fields: Map<String, Value>,
        now_ms: u64,
    ) -> Self {
        let (mut merged, created_at) = match existing {
            Some(record) => (record.fields, record.created_at),
            None => (Map::new(), now_ms),
        };

        for (name, value) in fields {
            if !RESERVED_FIELDS.contains(&name.as_str()) {
                merged.insert(name, value);
            }
        }

        Self {
            key,
            fields: merged,
            created_at,
            updated_at: now_ms,
        }
    }

    /// Flat JSON document: caller fields plus identifiers and timestamps.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        document.insert(
            PROPERTY_ID_FIELD.to_string(),
            Value::from(self.key.property_id()),
        );
        document.insert(
            TENANT_ACCOUNT_ID_FIELD.to_string(),
            Value::from(self.key.tenant_account_id()),
        );
        for (name, value) in &self.fields {
            document.insert(name.clone(), value.clone());
        }
        document.insert(CREATED_AT_FIELD.to_string(), Value::from(self.created_at));
        document.insert(UPDATED_AT_FIELD.to_string(), Value::from(self.updated_at));
        Value::Object(document)
    }
}

// =============================================================================
// TESTS
// =============================================================================
