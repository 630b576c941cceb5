//! Field binding CRUD handlers

use abforge_core::{
    validate_binding_fields, BoundField, DataType, FieldBinding, FieldClassification,
    ValidationReport,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use super::require_field;
use crate::api::rest::extractors::JsonBody;
use crate::api::rest::types::{
    AckResponse, BindingQuery, BindingTemplate, CloneBindingPayload, CreateBindingPayload,
    UpdateBindingPayload, ValidateBindingPayload,
};
use crate::error::ServerError;
use crate::state::AppState;

/// List bindings, optionally restricted to one action button type
pub(in crate::api) async fn list_bindings(
    State(state): State<AppState>,
    Query(query): Query<BindingQuery>,
) -> Result<Json<Vec<FieldBinding>>, ServerError> {
    let bindings = state
        .bindings
        .list(query.action_button_type.as_deref())
        .await?;
    Ok(Json(bindings))
}

/// Create a binding
#[axum::debug_handler]
pub(in crate::api) async fn create_binding(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateBindingPayload>,
) -> Result<Json<FieldBinding>, ServerError> {
    let name = require_field(payload.name, "name")?;
    let action_button_type = require_field(payload.action_button_type, "actionButtonType")?;

    let binding = FieldBinding::new(name, action_button_type, payload.description, payload.fields);
    info!("Creating field binding '{}' ({})", binding.name, binding.id);

    state.bindings.create(&binding).await?;
    Ok(Json(binding))
}

/// Fetch one binding
pub(in crate::api) async fn get_binding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BindingQuery>,
) -> Result<Json<FieldBinding>, ServerError> {
    let binding = state
        .bindings
        .resolve(&id, query.action_button_type.as_deref())
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Field binding not found: {}", id)))?;
    Ok(Json(binding))
}

/// Update a binding's mutable fields; identity and partition key stay put
#[axum::debug_handler]
pub(in crate::api) async fn update_binding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateBindingPayload>,
) -> Result<Json<FieldBinding>, ServerError> {
    let mut binding = state
        .bindings
        .resolve(&id, payload.action_button_type.as_deref())
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Field binding not found: {}", id)))?;

    if let Some(name) = payload.name {
        if !name.trim().is_empty() {
            binding.name = name;
        }
    }
    if let Some(description) = payload.description {
        binding.description = Some(description);
    }
    if let Some(fields) = payload.fields {
        binding.fields = fields;
    }
    if let Some(is_active) = payload.is_active {
        binding.is_active = is_active;
    }
    binding.updated_at = Utc::now();

    state.bindings.replace(&binding).await?;
    Ok(Json(binding))
}

/// Hard-delete a binding
pub(in crate::api) async fn delete_binding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BindingQuery>,
) -> Result<Json<AckResponse>, ServerError> {
    let binding = state
        .bindings
        .resolve(&id, query.action_button_type.as_deref())
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Field binding not found: {}", id)))?;

    state
        .bindings
        .delete(&binding.id, &binding.action_button_type)
        .await?;

    info!("Deleted field binding '{}'", binding.id);
    Ok(Json(AckResponse {
        success: true,
        message: format!("Field binding {} deleted", binding.id),
    }))
}

/// Structural validation for a field list
pub(in crate::api) async fn validate_binding(
    JsonBody(payload): JsonBody<ValidateBindingPayload>,
) -> Json<ValidationReport> {
    Json(validate_binding_fields(&payload.fields))
}

/// Duplicate a binding under a fresh id
#[axum::debug_handler]
pub(in crate::api) async fn clone_binding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CloneBindingPayload>,
) -> Result<Json<FieldBinding>, ServerError> {
    let source = state
        .bindings
        .resolve(&id, payload.action_button_type.as_deref())
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Field binding not found: {}", id)))?;

    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{} (copy)", source.name));

    let copy = source.clone_as(name);
    state.bindings.create(&copy).await?;

    info!("Cloned field binding '{}' as '{}'", source.id, copy.id);
    Ok(Json(copy))
}

/// Built-in starter templates
pub(in crate::api) async fn binding_templates() -> Json<Vec<BindingTemplate>> {
    Json(builtin_templates())
}

fn field(
    name: &str,
    data_type: DataType,
    classification: FieldClassification,
    required: bool,
    description: &str,
) -> BoundField {
    BoundField {
        name: name.to_string(),
        data_type,
        classification,
        required,
        description: Some(description.to_string()),
    }
}

fn builtin_templates() -> Vec<BindingTemplate> {
    vec![
        BindingTemplate {
            id: "forecast-refresh".to_string(),
            name: "Forecast Refresh".to_string(),
            description: "Recalculate forecast measures for the selected item scope".to_string(),
            action_button_type: "forecast".to_string(),
            fields: vec![
                field(
                    "Item",
                    DataType::Array,
                    FieldClassification::Dimension,
                    true,
                    "Items in scope",
                ),
                field(
                    "Location",
                    DataType::Array,
                    FieldClassification::Dimension,
                    false,
                    "Locations in scope",
                ),
                field(
                    "Forecast Qty",
                    DataType::Number,
                    FieldClassification::Measure,
                    true,
                    "Forecast quantity measure",
                ),
                field(
                    "Horizon Weeks",
                    DataType::Number,
                    FieldClassification::Parameter,
                    false,
                    "Planning horizon in weeks",
                ),
            ],
        },
        BindingTemplate {
            id: "allocation-push".to_string(),
            name: "Allocation Push".to_string(),
            description: "Push allocated quantities from source to destination locations"
                .to_string(),
            action_button_type: "allocation".to_string(),
            fields: vec![
                field(
                    "SKU",
                    DataType::Array,
                    FieldClassification::Dimension,
                    true,
                    "SKUs to allocate",
                ),
                field(
                    "Allocated Qty",
                    DataType::Number,
                    FieldClassification::Measure,
                    true,
                    "Quantity to push",
                ),
                field(
                    "Respect Capacity",
                    DataType::Boolean,
                    FieldClassification::Parameter,
                    false,
                    "Cap pushes at destination capacity",
                ),
            ],
        },
        BindingTemplate {
            id: "scenario-copy".to_string(),
            name: "Scenario Copy".to_string(),
            description: "Copy measure values between planning scenarios".to_string(),
            action_button_type: "scenario".to_string(),
            fields: vec![
                field(
                    "Scenario",
                    DataType::String,
                    FieldClassification::Dimension,
                    true,
                    "Source scenario",
                ),
                field(
                    "Target Value",
                    DataType::Number,
                    FieldClassification::Measure,
                    true,
                    "Measure copied into the target",
                ),
                field(
                    "As Of Date",
                    DataType::Date,
                    FieldClassification::Parameter,
                    false,
                    "Cutoff date for the copy",
                ),
            ],
        },
    ]
}
