use super::error::ApiError;
use axum::Json;
use boundary_core::{BoundaryReport, BuildingSpace, SystemInstance};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    #[serde(default)]
    pub systems: Vec<SystemInstance>,
    #[serde(default)]
    pub spaces: Vec<BuildingSpace>,
    #[serde(default)]
    pub tenant_account_id: Option<String>,
}

/// `POST /api/boundary/resolve`
pub async fn resolve(Json(request): Json<ResolveRequest>) -> Result<Json<Value>, ApiError> {
    let tenant_account_id = request
        .tenant_account_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("tenantAccountId is required".to_string()))?;

    let report = BoundaryReport::build(&request.systems, &request.spaces, &tenant_account_id);

    tracing::debug!(
        tenant_account_id = %tenant_account_id,
        systems = report.results.len(),
        in_scope_spaces = report.in_scope_spaces,
        "boundary resolved"
    );

    Ok(Json(json!({ "ok": true, "report": report })))
}
