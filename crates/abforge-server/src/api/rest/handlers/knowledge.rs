//! Knowledge-base handlers
//!
//! Upload/list/fetch/delete for the example scripts behind the retriever.
//! Content travels as text in the JSON body; multipart upload is handled
//! upstream of this service.

use abforge_core::ExampleArtifact;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::require_field;
use crate::api::rest::extractors::JsonBody;
use crate::api::rest::types::{AckResponse, KnowledgeQuery, UploadKnowledgePayload};
use crate::error::ServerError;
use crate::state::AppState;
use abforge_store::{blob_key, KNOWLEDGE_CATEGORY, SCRIPT_MIME};

/// Upload an example script (metadata + blob pair)
#[axum::debug_handler]
pub(in crate::api) async fn upload_knowledge(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UploadKnowledgePayload>,
) -> Result<Json<ExampleArtifact>, ServerError> {
    let action_button_type = require_field(payload.action_button_type, "actionButtonType")?;
    let file_name = require_field(payload.file_name, "fileName")?;
    let content = require_field(payload.content, "content")?;

    if content.len() as u64 > state.max_example_file_bytes {
        return Err(ServerError::InvalidRequest(format!(
            "File content exceeds the {} byte limit",
            state.max_example_file_bytes
        )));
    }

    let id = Uuid::new_v4().to_string();
    let artifact = ExampleArtifact {
        file_path: blob_key(&id),
        id,
        category: payload
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| KNOWLEDGE_CATEGORY.to_string()),
        action_button_type,
        file_name,
        file_type: payload
            .file_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| SCRIPT_MIME.to_string()),
        file_size: content.len() as u64,
        description: payload.description,
        uploaded_at: Utc::now(),
    };

    info!(
        "Uploading knowledge artifact '{}' ({} bytes)",
        artifact.file_name, artifact.file_size
    );
    state.knowledge.create(&artifact, content.as_bytes()).await?;

    Ok(Json(artifact))
}

/// List artifacts, optionally filtered
pub(in crate::api) async fn list_knowledge(
    State(state): State<AppState>,
    Query(query): Query<KnowledgeQuery>,
) -> Result<Json<Vec<ExampleArtifact>>, ServerError> {
    let artifacts = state
        .knowledge
        .list(
            query.category.as_deref(),
            query.action_button_type.as_deref(),
        )
        .await?;
    Ok(Json(artifacts))
}

/// Fetch an artifact's raw content
pub(in crate::api) async fn knowledge_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let artifact = state
        .knowledge
        .find(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Knowledge artifact not found: {}", id)))?;

    let bytes = state.knowledge.content(&artifact).await?;

    Ok((
        [(header::CONTENT_TYPE, artifact.file_type.clone())],
        bytes,
    )
        .into_response())
}

/// Delete an artifact and its blob
pub(in crate::api) async fn delete_knowledge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ServerError> {
    state.knowledge.delete(&id).await?;

    info!("Deleted knowledge artifact '{}'", id);
    Ok(Json(AckResponse {
        success: true,
        message: format!("Knowledge artifact {} deleted", id),
    }))
}
