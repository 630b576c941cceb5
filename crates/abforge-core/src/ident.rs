//! Deterministic identifier derivation
//!
//! Project names arrive as free text and are reused as partition keys,
//! module names, and download filenames. Every derived form keeps only
//! ASCII alphanumerics so no user-supplied character ever reaches a header
//! or storage key.

/// Derive the project partition key from a project name.
///
/// Lowercases and strips everything that is not an ASCII alphanumeric:
/// `"My Project! 2"` -> `"myproject2"`. Pure and deterministic, so the
/// same project name always lands in the same partition.
pub fn derive_project_id(project_name: &str) -> String {
    project_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Derive the generated module's name: `o9.<name with non-alphanumerics
/// stripped>`, case preserved.
pub fn module_name(project_name: &str) -> String {
    let stripped: String = project_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("o9.{stripped}")
}

/// Sanitize a project name into a filename stem.
///
/// Keeps ASCII alphanumerics only; falls back to a fixed stem when nothing
/// survives, so the result is always usable in a Content-Disposition
/// header.
pub fn sanitize_file_name(project_name: &str) -> String {
    let stem: String = project_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if stem.is_empty() {
        "actionbutton".to_string()
    } else {
        stem
    }
}
