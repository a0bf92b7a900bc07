//! # Storage Module
//!
//! Persistence for tenant floor-scope records using redb.
//!
//! Uses redb embedded database for:
//! - ACID transactions (an upsert is one read-modify-write transaction)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)

mod redb_scope;

pub use redb_scope::RedbScopeStore;

use crate::error::StoreError;
use crate::scope::{ScopeKey, ScopeRecord};
use serde_json::{Map, Value};

/// Keyed store of scope records.
pub trait ScopeStore: Send + Sync {
    /// Set `fields` on the record at `key`, creating it if absent.
    /// Returns the record as stored after the write.
    fn upsert(
        &self,
        key: &ScopeKey,
        fields: Map<String, Value>,
        now_ms: u64,
    ) -> Result<ScopeRecord, StoreError>;

    /// The record at `key`, if any.
    fn fetch(&self, key: &ScopeKey) -> Result<Option<ScopeRecord>, StoreError>;

    /// All records of one property, ordered by tenant account id.
    fn list_property(&self, property_id: &str) -> Result<Vec<ScopeRecord>, StoreError>;
}
