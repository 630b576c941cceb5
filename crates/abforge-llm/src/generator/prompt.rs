//! Prompt assembly
//!
//! Pure construction of the two-message prompt from the request inputs,
//! the resolved binding, and whatever examples the retriever produced.
//! Each example body is hard-capped so prompt size stays bounded no matter
//! what was uploaded to the knowledge base.

use abforge_core::{module_name, FieldBinding};

use crate::generator::prompt_templates::{
    ADDITIONAL_REQUIREMENTS_HEADING, BUSINESS_LOGIC_HEADING, CLOSING_INSTRUCTION, EXAMPLE_HEADING,
    FIELDS_HEADING, SYSTEM_MESSAGE,
};

/// Maximum characters of one example body included in the prompt
pub const MAX_EXAMPLE_CHARS: usize = 6000;

/// Marker appended when an example body was cut at the cap
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// One retrieved example, already decoded to text
#[derive(Debug, Clone)]
pub struct ExampleSource {
    pub file_name: String,
    pub description: Option<String>,
    pub content: String,
}

/// Inputs to prompt assembly
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    pub project_name: &'a str,
    pub action_button_type: &'a str,
    pub business_logic: &'a str,
    pub binding: &'a FieldBinding,
    pub examples: &'a [ExampleSource],
    pub additional_requirements: Option<&'a str>,
}

/// The assembled two-message prompt
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub system: String,
    pub user: String,
}

/// Assemble the generation prompt. Pure: same inputs, same prompt.
pub fn assemble_prompt(input: &PromptInput<'_>) -> AssembledPrompt {
    let mut user = String::new();

    user.push_str(&format!(
        "Generate the IronPython script for the O9 action button module `{}`.\n",
        module_name(input.project_name)
    ));
    user.push_str(&format!(
        "Project: {}\nAction button type: {}\n\n",
        input.project_name, input.action_button_type
    ));

    user.push_str(BUSINESS_LOGIC_HEADING);
    user.push('\n');
    user.push_str(input.business_logic);
    user.push_str("\n\n");

    user.push_str(FIELDS_HEADING);
    user.push('\n');
    for field in &input.binding.fields {
        let requirement = if field.required { "required" } else { "optional" };
        user.push_str(&format!(
            "- {} | {} | {} | {}",
            field.name,
            render_enum(&field.data_type),
            render_enum(&field.classification),
            requirement
        ));
        if let Some(description) = &field.description {
            user.push_str(&format!(" | {}", description));
        }
        user.push('\n');
    }

    for example in input.examples {
        user.push('\n');
        user.push_str(&EXAMPLE_HEADING.replace("{file_name}", &example.file_name));
        user.push('\n');
        if let Some(description) = &example.description {
            user.push_str(&format!("Description: {}\n", description));
        }
        user.push_str(&capped_body(&example.content));
        user.push('\n');
    }

    if let Some(additional) = input.additional_requirements {
        if !additional.trim().is_empty() {
            user.push('\n');
            user.push_str(ADDITIONAL_REQUIREMENTS_HEADING);
            user.push('\n');
            user.push_str(additional);
            user.push('\n');
        }
    }

    user.push('\n');
    user.push_str(CLOSING_INSTRUCTION);

    AssembledPrompt {
        system: SYSTEM_MESSAGE.to_string(),
        user,
    }
}

fn capped_body(content: &str) -> String {
    if content.chars().count() <= MAX_EXAMPLE_CHARS {
        return content.to_string();
    }
    let mut capped: String = content.chars().take(MAX_EXAMPLE_CHARS).collect();
    capped.push('\n');
    capped.push_str(TRUNCATION_MARKER);
    capped
}

fn render_enum<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
