//! Record version handling
//!
//! Generated code records carry a `major.minor.patch` version string.
//! Regeneration bumps only the patch component, as an integer.

use crate::error::CoreError;

/// Version assigned to a freshly generated record
pub const INITIAL_VERSION: &str = "1.0.0";

/// Increment the patch component of a `major.minor.patch` version string.
///
/// The patch is parsed and incremented as an integer, not concatenated:
/// `"1.2.9"` -> `"1.2.10"`.
pub fn bump_patch_version(version: &str) -> Result<String, CoreError> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(CoreError::InvalidVersion(version.to_string()));
    }

    let major: u64 = parts[0]
        .parse()
        .map_err(|_| CoreError::InvalidVersion(version.to_string()))?;
    let minor: u64 = parts[1]
        .parse()
        .map_err(|_| CoreError::InvalidVersion(version.to_string()))?;
    let patch: u64 = parts[2]
        .parse()
        .map_err(|_| CoreError::InvalidVersion(version.to_string()))?;

    Ok(format!("{}.{}.{}", major, minor, patch + 1))
}
