//! # CLI
//!
//! Command definitions and implementations.
//!
//! Each `cmd_*` function returns the text to print so it can be tested
//! without capturing stdout.

use crate::config::ServeArgs;
use boundary_core::{
    BoundaryReport, BuildingSpace, RedbScopeStore, ScopeError, ScopeKey, ScopeRecord, ScopeStore,
    SystemInstance,
};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Parser)]
#[command(name = "boundary", version, about = "Tenant/landlord boundary resolution")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),

    /// Classify systems for a tenant from JSON files.
    Resolve {
        /// JSON array of systems.
        #[arg(long)]
        systems: PathBuf,

        /// JSON array of spaces.
        #[arg(long)]
        spaces: PathBuf,

        /// Target tenant account id.
        #[arg(long)]
        tenant: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Read or write tenant floor-scope records.
    Scope {
        #[command(subcommand)]
        action: ScopeCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScopeCommand {
    /// Create or update a scope record.
    Put {
        #[arg(long, env = "BOUNDARY_DB", default_value = "boundary.redb")]
        db: PathBuf,
        #[arg(long)]
        property: String,
        #[arg(long)]
        tenant: String,
        /// JSON object of fields to set.
        #[arg(long, default_value = "{}")]
        fields: String,
    },

    /// Print one scope record, or `null`.
    Get {
        #[arg(long, env = "BOUNDARY_DB", default_value = "boundary.redb")]
        db: PathBuf,
        #[arg(long)]
        property: String,
        #[arg(long)]
        tenant: String,
    },

    /// Print every scope record of a property.
    List {
        #[arg(long, env = "BOUNDARY_DB", default_value = "boundary.redb")]
        db: PathBuf,
        #[arg(long)]
        property: String,
    },
}

// =============================================================================
// HELPERS
// =============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
    let value = serde_json::from_str(&content)
        .map_err(|err| format!("invalid JSON in {}: {}", path.display(), err))?;
    Ok(value)
}

fn parse_fields(fields: &str) -> CliResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(fields)? {
        Value::Object(map) => Ok(map),
        _ => Err(ScopeError::NotAnObject.into()),
    }
}

fn pretty(value: &Value) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// `boundary resolve`
pub fn cmd_resolve(
    systems_path: &Path,
    spaces_path: &Path,
    tenant: &str,
    json: bool,
) -> CliResult<String> {
    if tenant.is_empty() {
        return Err("tenant account id must not be empty".into());
    }
    let systems: Vec<SystemInstance> = read_json(systems_path)?;
    let spaces: Vec<BuildingSpace> = read_json(spaces_path)?;

    let report = BoundaryReport::build(&systems, &spaces, tenant);
    tracing::debug!(
        systems = systems.len(),
        spaces = spaces.len(),
        in_scope_spaces = report.in_scope_spaces,
        "boundary resolved"
    );

    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_text())
    }
}

/// `boundary scope put`
pub fn cmd_scope_put(
    db: &Path,
    property: &str,
    tenant: &str,
    fields: &str,
    now_ms: u64,
) -> CliResult<String> {
    let key = ScopeKey::new(property, tenant)?;
    let fields = parse_fields(fields)?;

    let store = RedbScopeStore::open(db)?;
    let record = store.upsert(&key, fields, now_ms)?;
    tracing::info!(property_id = property, tenant_account_id = tenant, "scope record upserted");

    pretty(&record.to_document())
}

/// `boundary scope get`
pub fn cmd_scope_get(db: &Path, property: &str, tenant: &str) -> CliResult<String> {
    let key = ScopeKey::new(property, tenant)?;
    let store = RedbScopeStore::open(db)?;
    let document = store
        .fetch(&key)?
        .as_ref()
        .map_or(Value::Null, ScopeRecord::to_document);
    pretty(&document)
}

/// `boundary scope list`
pub fn cmd_scope_list(db: &Path, property: &str) -> CliResult<String> {
    if property.is_empty() {
        return Err(ScopeError::MissingIdentifiers.into());
    }
    let store = RedbScopeStore::open(db)?;
    let documents: Vec<Value> = store
        .list_property(property)?
        .iter()
        .map(ScopeRecord::to_document)
        .collect();
    pretty(&Value::Array(documents))
}
