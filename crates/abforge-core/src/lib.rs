//! abforge-core - Core types and definitions for the action button code service
//!
//! This crate provides the fundamental types used across the abforge
//! workspace:
//! - Domain records (field bindings, knowledge artifacts, generated code)
//! - Pure identifier and version helpers
//! - Structural validation for field bindings
//! - Error types

pub mod error;
pub mod ident;
pub mod model;
pub mod validate;
pub mod version;

// Re-export commonly used types
pub use error::CoreError;
pub use ident::{derive_project_id, module_name, sanitize_file_name};
pub use model::{
    BoundField, DataType, ExampleArtifact, ExampleRef, FieldBinding, FieldClassification,
    GeneratedCodeRecord, GenerationStatus,
};
pub use validate::{validate_binding_fields, ValidationReport};
pub use version::{bump_patch_version, INITIAL_VERSION};
