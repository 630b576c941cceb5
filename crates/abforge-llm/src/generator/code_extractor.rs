//! Code extraction utilities for cleaning LLM responses
//!
//! Models are instructed to return bare source, but frequently wrap it in
//! markdown fences or prepend a sentence anyway. This strips those
//! wrappers and hands back the code.

use regex::Regex;

use crate::error::{LLMError, Result};

/// Extract the code body from a raw LLM response.
///
/// Handles the common output patterns:
/// - fenced blocks (```python ... ``` or bare ``` ... ```)
/// - explanatory text before the first fence
/// - clean unfenced output (returned as-is)
pub fn extract_code(llm_output: &str) -> Result<String> {
    let cleaned = llm_output.trim();

    if cleaned.is_empty() {
        return Err(LLMError::InvalidResponse(
            "Empty completion content".to_string(),
        ));
    }

    let fence = Regex::new(r"(?s)```(?:python|py)?[ \t]*\n(.*?)```").unwrap();
    if let Some(captures) = fence.captures(cleaned) {
        let body = captures[1].trim();
        if body.is_empty() {
            return Err(LLMError::InvalidResponse(
                "Fenced code block was empty".to_string(),
            ));
        }
        return Ok(body.to_string());
    }

    Ok(cleaned.to_string())
}
