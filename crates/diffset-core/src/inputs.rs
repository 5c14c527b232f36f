use std::path::PathBuf;

use crate::error::DiffsetError;
use crate::Result;

/// Validated action inputs.
///
/// Raw values arrive as strings from the runner's `INPUT_*` environment (or
/// CLI flags in local runs), where "unset" is encoded as an absent or empty
/// string. [`ActionInputs::from_raw`] normalizes and validates them once, up
/// front, so the rest of the pipeline never re-checks.
///
/// # Examples
///
/// ```
/// use diffset_core::ActionInputs;
///
/// let inputs = ActionInputs::from_raw(
///     Some("ghp_secret".into()),
///     None,
///     Some("true".into()),
///     None,
/// )
/// .unwrap();
/// assert_eq!(inputs.token, "ghp_secret");
/// assert!(inputs.pretty);
/// assert!(!inputs.debug);
/// assert!(inputs.path.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// API token used for the compare request. Required.
    pub token: String,
    /// Destination file for the JSON result, if any.
    pub path: Option<PathBuf>,
    /// Indent the `json` output with four spaces.
    pub pretty: bool,
    /// Emit one stderr line per classified file.
    pub debug: bool,
}

impl ActionInputs {
    /// Builds inputs from raw string values.
    ///
    /// Values are trimmed; empty means unset. `pretty` and `debug` must be
    /// JSON booleans (`true` / `false`) when set and default to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Config`] when a boolean input is set to
    /// anything but a JSON boolean, or when `token` is missing.
    pub fn from_raw(
        token: Option<String>,
        path: Option<String>,
        pretty: Option<String>,
        debug: Option<String>,
    ) -> Result<Self> {
        let debug = parse_bool_input("debug", debug)?;
        let pretty = parse_bool_input("pretty", pretty)?;
        let path = normalize(path).map(PathBuf::from);
        let token = normalize(token)
            .ok_or_else(|| DiffsetError::Config("input 'token' is required".into()))?;
        Ok(ActionInputs {
            token,
            path,
            pretty,
            debug,
        })
    }
}

/// Trims a raw input and maps empty to unset.
fn normalize(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_bool_input(name: &str, raw: Option<String>) -> Result<bool> {
    match normalize(raw) {
        None => Ok(false),
        Some(value) => serde_json::from_str(&value)
            .map_err(|e| DiffsetError::Config(format!("invalid boolean input '{name}': {e}"))),
    }
}
