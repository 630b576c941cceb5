//! The generation pipeline
//!
//! One sequential implementation of "generate action button code":
//! resolve the binding, retrieve examples best-effort, assemble the
//! prompt, call the completion service once, persist the record. Nothing
//! is written unless generation succeeded.

use abforge_core::{
    bump_patch_version, derive_project_id, ExampleRef, GeneratedCodeRecord, GenerationStatus,
    INITIAL_VERSION,
};
use abforge_llm::{assemble_prompt, ExampleSource, PromptInput};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// Maximum number of examples included in a prompt
pub const MAX_EXAMPLES: usize = 3;

/// Validated inputs for a generation request
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub project_name: String,
    pub action_button_type: String,
    pub business_logic: String,
    pub field_binding_id: String,
    pub additional_requirements: Option<String>,
}

/// Run the full generation pipeline and persist the result
pub async fn generate(
    state: &AppState,
    params: GenerateParams,
) -> Result<GeneratedCodeRecord, ServerError> {
    let project_id = derive_project_id(&params.project_name);
    if project_id.is_empty() {
        return Err(ServerError::InvalidRequest(
            "projectName must contain at least one alphanumeric character".to_string(),
        ));
    }

    let binding = state
        .bindings
        .resolve(&params.field_binding_id, Some(&params.action_button_type))
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!(
                "Field binding not found: {}",
                params.field_binding_id
            ))
        })?;

    let examples = fetch_examples(state, &params.action_button_type).await;
    info!(
        "Generating code for project '{}' with {} example(s)",
        params.project_name,
        examples.len()
    );

    let prompt = assemble_prompt(&PromptInput {
        project_name: &params.project_name,
        action_button_type: &params.action_button_type,
        business_logic: &params.business_logic,
        binding: &binding,
        examples: &examples,
        additional_requirements: params.additional_requirements.as_deref(),
    });

    let code = state.generator.generate(&prompt).await?;

    let record = GeneratedCodeRecord {
        id: Uuid::new_v4().to_string(),
        project_id,
        project_name: params.project_name,
        action_button_type: params.action_button_type,
        business_logic: params.business_logic,
        field_binding_id: binding.id.clone(),
        field_binding: binding,
        generated_code: code,
        examples: examples
            .iter()
            .map(|e| ExampleRef {
                file_name: e.file_name.clone(),
                description: e.description.clone(),
            })
            .collect(),
        generated_at: Utc::now(),
        version: INITIAL_VERSION.to_string(),
        status: GenerationStatus::Generated,
    };

    state.generated.create(&record).await?;
    Ok(record)
}

/// Regenerate an existing record with a modification request
///
/// The stored binding snapshot drives the prompt and examples are not
/// re-fetched. The modification text is appended to the stored business
/// logic as an audit trail, the patch version is bumped, and the record
/// is replaced in place. Concurrent regenerations are not coordinated;
/// the last writer wins.
pub async fn regenerate(
    state: &AppState,
    id: &str,
    project_id: &str,
    modifications: &str,
) -> Result<GeneratedCodeRecord, ServerError> {
    let mut record = state
        .generated
        .get(id, project_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Generated code record not found: {}", id)))?;

    record.business_logic.push_str("\n\nModification request: ");
    record.business_logic.push_str(modifications);

    let prompt = assemble_prompt(&PromptInput {
        project_name: &record.project_name,
        action_button_type: &record.action_button_type,
        business_logic: &record.business_logic,
        binding: &record.field_binding,
        examples: &[],
        additional_requirements: None,
    });

    let code = state.generator.generate(&prompt).await?;

    record.generated_code = code;
    record.version = bump_patch_version(&record.version)?;
    record.status = GenerationStatus::Regenerated;
    record.generated_at = Utc::now();

    state.generated.replace(&record).await?;
    Ok(record)
}

/// Fetch up to [`MAX_EXAMPLES`] example bodies for the prompt.
///
/// Examples are a quality enhancement, never a correctness requirement:
/// any failure here is logged and the pipeline proceeds with whatever was
/// retrieved, down to nothing at all.
async fn fetch_examples(state: &AppState, action_button_type: &str) -> Vec<ExampleSource> {
    let artifacts = match state
        .knowledge
        .latest_examples(action_button_type, MAX_EXAMPLES)
        .await
    {
        Ok(artifacts) => artifacts,
        Err(e) => {
            warn!("Example metadata query failed, generating without examples: {}", e);
            return Vec::new();
        }
    };

    let mut examples = Vec::new();
    for artifact in artifacts {
        match state.knowledge.content(&artifact).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => examples.push(ExampleSource {
                    file_name: artifact.file_name,
                    description: artifact.description,
                    content,
                }),
                Err(_) => {
                    warn!("Example {} is not valid UTF-8, skipping", artifact.file_name);
                }
            },
            Err(e) => {
                warn!("Failed to download example {}: {}", artifact.file_name, e);
            }
        }
    }
    examples
}
