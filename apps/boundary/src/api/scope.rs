//! Tenant floor-scope endpoints.
//!
//! redb calls block, so every store access runs on the blocking pool.

use super::AppState;
use super::error::ApiError;
use crate::now_millis;
use axum::Json;
use axum::extract::{Path, Query, State};
use boundary_core::scope::split_document;
use boundary_core::{ScopeKey, ScopeRecord};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    pub property_id: Option<String>,
    pub tenant_account_id: Option<String>,
}

/// `PUT /api/tenant-floor-scope`
pub async fn put_scope(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let (key, fields) = split_document(document).inspect_err(|err| {
        tracing::warn!(error = %err, "rejected scope upsert");
    })?;

    let store = state.store.clone();
    let now = now_millis();
    let record = tokio::task::spawn_blocking(move || store.upsert(&key, fields, now)).await??;

    tracing::info!(
        property_id = record.key.property_id(),
        tenant_account_id = record.key.tenant_account_id(),
        fields = record.fields.len(),
        "scope record upserted"
    );

    Ok(Json(json!({ "ok": true, "scope": record.to_document() })))
}

/// `GET /api/tenant-floor-scope?propertyId=..&tenantAccountId=..`
pub async fn get_scope(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<Value>, ApiError> {
    let key = ScopeKey::from_parts(
        query.property_id.as_deref(),
        query.tenant_account_id.as_deref(),
    )
    .inspect_err(|err| tracing::warn!(error = %err, "rejected scope fetch"))?;

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || store.fetch(&key)).await??;

    let scope = record.as_ref().map_or(Value::Null, ScopeRecord::to_document);
    Ok(Json(json!({ "ok": true, "scope": scope })))
}

/// `GET /api/tenant-floor-scope/{property_id}`
pub async fn list_scopes(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.clone();
    let records = tokio::task::spawn_blocking(move || store.list_property(&property_id)).await??;

    let scopes: Vec<Value> = records.iter().map(ScopeRecord::to_document).collect();
    Ok(Json(json!({ "ok": true, "scopes": scopes })))
}
