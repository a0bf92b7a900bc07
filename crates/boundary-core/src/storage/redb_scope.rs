//! redb-backed scope store.
//!
//! One table keyed by `(propertyId, tenantAccountId)`. Values are a postcard
//! envelope holding the timestamps and the caller fields as JSON text, since
//! arbitrary JSON cannot go through postcard directly.

use super::ScopeStore;
use crate::error::StoreError;
use crate::scope::{ScopeKey, ScopeRecord};
use redb::backends::InMemoryBackend;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

const SCOPES: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("tenant_floor_scope");

/// On-disk form of a record. The key lives in the table key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredScope {
    created_at: u64,
    updated_at: u64,
    fields_json: String,
}

fn encode(record: &ScopeRecord) -> Result<Vec<u8>, StoreError> {
    let stored = StoredScope {
        created_at: record.created_at,
        updated_at: record.updated_at,
        fields_json: serde_json::to_string(&record.fields)?,
    };
    Ok(postcard::to_stdvec(&stored)?)
}

fn decode(key: ScopeKey, bytes: &[u8]) -> Result<ScopeRecord, StoreError> {
    let stored: StoredScope = postcard::from_bytes(bytes)?;
    let fields: Map<String, Value> = serde_json::from_str(&stored.fields_json)?;
    Ok(ScopeRecord {
        key,
        fields,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    })
}

/// Scope store on a redb database.
pub struct RedbScopeStore {
    db: Database,
}

impl RedbScopeStore {
    /// Open or create the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// A store that lives only as long as this value.
    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db)
    }

    // Readers fail on a missing table, so create it up front.
    fn init(db: Database) -> Result<Self, StoreError> {
        let txn = db.begin_write()?;
        {
            txn.open_table(SCOPES)?;
        }
        txn.commit()?;
        Ok(Self { db })
    }
}

impl ScopeStore for RedbScopeStore {
    fn upsert(
        &self,
        key: &ScopeKey,
        fields: Map<String, Value>,
        now_ms: u64,
    ) -> Result<ScopeRecord, StoreError> {
        let table_key = (key.property_id(), key.tenant_account_id());
        let txn = self.db.begin_write()?;
        let record = {
            let mut table = txn.open_table(SCOPES)?;
            let existing = match table.get(table_key)? {
                Some(guard) => Some(decode(key.clone(), guard.value())?),
                None => None,
            };
            let record = ScopeRecord::upserted(existing, key.clone(), fields, now_ms);
            let bytes = encode(&record)?;
            table.insert(table_key, bytes.as_slice())?;
            record
        };
        txn.commit()?;
        Ok(record)
    }

    fn fetch(&self, key: &ScopeKey) -> Result<Option<ScopeRecord>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SCOPES)?;
        match table.get((key.property_id(), key.tenant_account_id()))? {
            Some(guard) => Ok(Some(decode(key.clone(), guard.value())?)),
            None => Ok(None),
        }
    }

    fn list_property(&self, property_id: &str) -> Result<Vec<ScopeRecord>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SCOPES)?;
        let mut records = Vec::new();
        for entry in table.range((property_id, "")..)? {
            let (stored_key, value) = entry?;
            let (stored_property, tenant_account_id) = stored_key.value();
            if stored_property != property_id {
                break;
            }
            let key = ScopeKey::new(stored_property, tenant_account_id)?;
            records.push(decode(key, value.value())?);
        }
        Ok(records)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn key(property: &str, tenant: &str) -> ScopeKey {
        ScopeKey::new(property, tenant).unwrap()
    }

    #[test]
    fn fetch_missing_returns_none() {
        let store = RedbScopeStore::in_memory().unwrap();
        assert!(store.fetch(&key("prop-1", "acme")).unwrap().is_none());
    }

    #[test]
    fn upsert_then_fetch() {
        let store = RedbScopeStore::in_memory().unwrap();
        let k = key("prop-1", "acme");

        let written = store.upsert(&k, fields(json!({"floors": [3, 4]})), 1_000).unwrap();
        let read = store.fetch(&k).unwrap();

        assert_eq!(read.as_ref(), Some(&written));
        assert_eq!(written.created_at, 1_000);
    }

    #[test]
    fn second_upsert_merges() {
        let store = RedbScopeStore::in_memory().unwrap();
        let k = key("prop-1", "acme");

        store
            .upsert(&k, fields(json!({"floors": [3], "label": "HQ"})), 1_000)
            .unwrap();
        let updated = store.upsert(&k, fields(json!({"floors": [3, 4]})), 2_000).unwrap();

        assert_eq!(updated.created_at, 1_000);
        assert_eq!(updated.updated_at, 2_000);
        assert_eq!(updated.fields["label"], json!("HQ"));
        assert_eq!(updated.fields["floors"], json!([3, 4]));
    }

    #[test]
    fn keys_are_independent() {
        let store = RedbScopeStore::in_memory().unwrap();
        store.upsert(&key("prop-1", "acme"), fields(json!({"a": 1})), 1).unwrap();
        store.upsert(&key("prop-1", "globex"), fields(json!({"b": 2})), 2).unwrap();
        store.upsert(&key("prop-2", "acme"), fields(json!({"c": 3})), 3).unwrap();

        let acme = store.fetch(&key("prop-1", "acme")).unwrap().unwrap();
        assert!(acme.fields.get("b").is_none());
    }

    #[test]
    fn list_property_is_bounded_to_property() {
        let store = RedbScopeStore::in_memory().unwrap();
        store.upsert(&key("prop-1", "globex"), Map::new(), 1).unwrap();
        store.upsert(&key("prop-1", "acme"), Map::new(), 2).unwrap();
        store.upsert(&key("prop-2", "acme"), Map::new(), 3).unwrap();
        store.upsert(&key("prop-10", "acme"), Map::new(), 4).unwrap();

        let tenants: Vec<_> = store
            .list_property("prop-1")
            .unwrap()
            .iter()
            .map(|r| r.key.tenant_account_id().to_string())
            .collect();
        assert_eq!(tenants, vec!["acme", "globex"]);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scopes.redb");
        let k = key("prop-1", "acme");

        {
            let store = RedbScopeStore::open(&path).unwrap();
            store.upsert(&k, fields(json!({"floors": [7]})), 5).unwrap();
        }

        let store = RedbScopeStore::open(&path).unwrap();
        let record = store.fetch(&k).unwrap().unwrap();
        assert_eq!(record.fields["floors"], json!([7]));
        assert_eq!(record.created_at, 5);
    }
}
