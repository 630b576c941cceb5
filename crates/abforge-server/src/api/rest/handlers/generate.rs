//! Generation endpoint handlers

use abforge_core::{sanitize_file_name, GeneratedCodeRecord};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::require_field;
use crate::api::rest::extractors::JsonBody;
use crate::api::rest::types::{
    GenerateRequestPayload, GenerateResponsePayload, ProjectQuery, RegenerateRequestPayload,
    RegenerateResponsePayload,
};
use crate::error::ServerError;
use crate::generation::{self, GenerateParams};
use crate::state::AppState;

/// Generate action button code
#[axum::debug_handler]
pub(in crate::api) async fn generate(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<GenerateRequestPayload>,
) -> Result<Json<GenerateResponsePayload>, ServerError> {
    // Validate presence of all four required fields before any downstream
    // call happens
    let project_name = require_field(payload.project_name, "projectName")?;
    let action_button_type = require_field(payload.action_button_type, "actionButtonType")?;
    let business_logic = require_field(payload.business_logic, "businessLogic")?;
    let field_binding_id = require_field(payload.field_binding_id, "fieldBindingId")?;

    info!(
        "Received generation request for project '{}' (type: {})",
        project_name, action_button_type
    );

    let record = generation::generate(
        &state,
        GenerateParams {
            project_name,
            action_button_type,
            business_logic,
            field_binding_id,
            additional_requirements: payload.additional_requirements,
        },
    )
    .await?;

    Ok(Json(GenerateResponsePayload {
        used_examples: record.examples.len(),
        code_id: record.id,
        project_name: record.project_name,
        generated_code: record.generated_code,
    }))
}

/// Fetch one stored record
pub(in crate::api) async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<GeneratedCodeRecord>, ServerError> {
    let project_id = require_project_id(query)?;

    let record = state
        .generated
        .get(&id, &project_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Generated code record not found: {}", id)))?;

    Ok(Json(record))
}

/// List a project's records, newest first
pub(in crate::api) async fn list_project_records(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<GeneratedCodeRecord>>, ServerError> {
    let records = state.generated.list_by_project(&project_id).await?;
    Ok(Json(records))
}

/// Regenerate an existing record with a modification request
#[axum::debug_handler]
pub(in crate::api) async fn regenerate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<RegenerateRequestPayload>,
) -> Result<Json<RegenerateResponsePayload>, ServerError> {
    let modifications = require_field(payload.modifications, "modifications")?;
    let project_id = require_field(payload.project_id, "projectId")?;

    info!("Received regeneration request for record '{}'", id);

    let record = generation::regenerate(&state, &id, &project_id, &modifications).await?;

    Ok(Json(RegenerateResponsePayload {
        code_id: record.id,
        generated_code: record.generated_code,
        version: record.version,
    }))
}

/// Download the generated code as an attachment
pub(in crate::api) async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> Result<Response, ServerError> {
    let project_id = require_project_id(query)?;

    let record = state
        .generated
        .get(&id, &project_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Generated code record not found: {}", id)))?;

    // The filename must survive header embedding no matter what the
    // project was called
    let file_name = format!("{}.py", sanitize_file_name(&record.project_name));

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/x-python; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        record.generated_code,
    )
        .into_response())
}

fn require_project_id(query: ProjectQuery) -> Result<String, ServerError> {
    query
        .project_id
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
            ServerError::InvalidRequest("Missing required query parameter: projectId".to_string())
        })
}
