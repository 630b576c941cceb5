//! Prompt assembly and code generation
//!
//! The assembler is a pure function from request inputs to a two-message
//! prompt; the generator sends it through a [`ChatClient`] and cleans the
//! completion into bare module source.
//!
//! # Example
//! ```no_run
//! use abforge_llm::{assemble_prompt, CodeGenerator, MockProvider, PromptInput};
//! use abforge_core::FieldBinding;
//! use std::sync::Arc;
//!
//! # async fn example(binding: FieldBinding) -> abforge_llm::Result<()> {
//! let generator = CodeGenerator::with_defaults(Arc::new(MockProvider::new()));
//!
//! let prompt = assemble_prompt(&PromptInput {
//!     project_name: "Demand Forecast",
//!     action_button_type: "forecast",
//!     business_logic: "Recalculate the forecast for the selected SKUs",
//!     binding: &binding,
//!     examples: &[],
//!     additional_requirements: None,
//! });
//! let code = generator.generate(&prompt).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`ChatClient`]: crate::client::ChatClient

pub mod code_extractor;
pub mod code_generator;
pub mod prompt;
pub mod prompt_templates;

// Re-export main types
pub use code_extractor::extract_code;
pub use code_generator::{CodeGenerator, CodeGeneratorConfig};
pub use prompt::{
    assemble_prompt, AssembledPrompt, ExampleSource, PromptInput, MAX_EXAMPLE_CHARS,
    TRUNCATION_MARKER,
};
