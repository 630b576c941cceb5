//! REST API type definitions
//!
//! Request and response payloads for the REST endpoints. Required request
//! fields deserialize as options so handlers can report exactly which
//! field is missing with a 400, instead of leaking serde's own wording.

use abforge_core::BoundField;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Generic operation acknowledgement
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Generation request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestPayload {
    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub action_button_type: Option<String>,

    #[serde(default)]
    pub business_logic: Option<String>,

    #[serde(default)]
    pub field_binding_id: Option<String>,

    #[serde(default)]
    pub additional_requirements: Option<String>,
}

/// Generation response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponsePayload {
    pub code_id: String,
    pub project_name: String,
    pub generated_code: String,
    /// Number of examples included in the prompt
    pub used_examples: usize,
}

/// Regeneration request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequestPayload {
    #[serde(default)]
    pub modifications: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,
}

/// Regeneration response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponsePayload {
    pub code_id: String,
    pub generated_code: String,
    pub version: String,
}

/// Query parameters addressing a record within a project
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Query parameters for binding lookups/listings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingQuery {
    #[serde(default)]
    pub action_button_type: Option<String>,
}

/// Binding creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBindingPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub action_button_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<BoundField>,
}

/// Binding update payload; identity and partition key are immutable
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBindingPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Option<Vec<BoundField>>,

    #[serde(default)]
    pub is_active: Option<bool>,

    /// Lookup hint only; a differing value does not move the binding
    #[serde(default)]
    pub action_button_type: Option<String>,
}

/// Structural validation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBindingPayload {
    #[serde(default)]
    pub fields: Vec<BoundField>,
}

/// Binding clone payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneBindingPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub action_button_type: Option<String>,
}

/// A starter binding template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub action_button_type: String,
    pub fields: Vec<BoundField>,
}

/// Knowledge-base upload payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadKnowledgePayload {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub action_button_type: Option<String>,

    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub file_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Query parameters for knowledge listings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeQuery {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub action_button_type: Option<String>,
}
