//! Domain records for the action button code service
//!
//! All records serialize as camelCase JSON because the same shapes travel
//! over the REST API and into the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data type of a bound field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    Array,
}

/// Classification of a bound field within the planning model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldClassification {
    Dimension,
    Measure,
    Parameter,
}

/// A single field referenced by an action button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundField {
    pub name: String,
    pub data_type: DataType,
    pub classification: FieldClassification,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Configuration describing which fields an action button references
///
/// Identity is immutable once created; the field list and metadata are
/// mutable. Bindings are soft-disabled via `is_active` in normal use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub id: String,
    pub name: String,
    /// Grouping/partition key in the document store
    pub action_button_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<BoundField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl FieldBinding {
    /// Create a new binding with a fresh id and current timestamps
    pub fn new(
        name: impl Into<String>,
        action_button_type: impl Into<String>,
        description: Option<String>,
        fields: Vec<BoundField>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            action_button_type: action_button_type.into(),
            description,
            fields,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Duplicate this binding under a fresh id with reset timestamps
    pub fn clone_as(&self, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            action_button_type: self.action_button_type.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }
}

/// Metadata for a knowledge-base example script
///
/// The byte content lives only in blob storage; this record is pure
/// metadata plus the blob key. Record and blob are created together and
/// deleted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleArtifact {
    pub id: String,
    pub category: String,
    pub action_button_type: String,
    pub file_name: String,
    /// Blob key; derived from the artifact id, never from user input
    pub file_path: String,
    /// MIME type of the stored content
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Reference to an example used during a generation, kept in the record's
/// history (filename + description only, not the content)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRef {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lifecycle status of a generated code record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Generated,
    Regenerated,
}

/// A persisted generation result
///
/// References exactly one field binding by id, snapshotted at generation
/// time; later edits to the binding do not retroactively affect past
/// generations. Mutated only by regeneration, which bumps the patch
/// version and overwrites code/logic/status/timestamp in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCodeRecord {
    pub id: String,
    /// Partition key, derived deterministically from the project name
    pub project_id: String,
    pub project_name: String,
    pub action_button_type: String,
    pub business_logic: String,
    pub field_binding_id: String,
    /// Denormalized snapshot of the binding used for generation
    pub field_binding: FieldBinding,
    pub generated_code: String,
    pub examples: Vec<ExampleRef>,
    pub generated_at: DateTime<Utc>,
    /// Semantic version, starts at "1.0.0"
    pub version: String,
    pub status: GenerationStatus,
}
