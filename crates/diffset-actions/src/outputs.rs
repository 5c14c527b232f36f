use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use diffset_core::{ClassifiedDiff, Result};

/// Writes step outputs through the runner's output protocol.
///
/// When `GITHUB_OUTPUT` names a file, outputs are appended to it as
/// `name=value` lines, switching to the heredoc form for multiline values.
/// Without it, the legacy `::set-output` workflow command is printed to
/// stdout with percent-escaped values.
pub struct OutputWriter {
    target: Option<PathBuf>,
}

impl OutputWriter {
    /// Picks the protocol from the `GITHUB_OUTPUT` environment variable.
    pub fn from_env() -> Self {
        let target = std::env::var("GITHUB_OUTPUT")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        OutputWriter { target }
    }

    /// Writes outputs to an explicit file, regardless of environment.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        OutputWriter {
            target: Some(path.into()),
        }
    }

    /// Publishes the full output set for a classified diff and returns the
    /// rendered `json` value.
    ///
    /// `json` honors `pretty`; the per-bucket outputs are always compact
    /// JSON arrays, and the `-count` outputs are plain integers.
    ///
    /// # Errors
    ///
    /// Returns [`diffset_core::DiffsetError::Io`] when the output file
    /// cannot be appended to, or
    /// [`diffset_core::DiffsetError::Serialization`] if encoding fails.
    pub fn publish(&self, diff: &ClassifiedDiff, pretty: bool) -> Result<String> {
        let json = diff.to_json(pretty)?;
        self.set_output("json", &json)?;
        self.set_output("all", &serde_json::to_string(&diff.all)?)?;
        self.set_output("added", &serde_json::to_string(&diff.added)?)?;
        self.set_output("modified", &serde_json::to_string(&diff.modified)?)?;
        self.set_output("removed", &serde_json::to_string(&diff.removed)?)?;
        self.set_output("renamed", &serde_json::to_string(&diff.renamed)?)?;
        self.set_output("all-count", &diff.all.len().to_string())?;
        self.set_output("added-count", &diff.added.len().to_string())?;
        self.set_output("modified-count", &diff.modified.len().to_string())?;
        self.set_output("removed-count", &diff.removed.len().to_string())?;
        self.set_output("renamed-count", &diff.renamed.len().to_string())?;
        Ok(json)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.target {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                write!(file, "{}", file_command(name, value))?;
            }
            None => println!("{}", legacy_command(name, value)),
        }
        Ok(())
    }
}

/// Formats one output for the `GITHUB_OUTPUT` file.
fn file_command(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delimiter = heredoc_delimiter(value);
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Picks a heredoc delimiter guaranteed absent from the value.
fn heredoc_delimiter(value: &str) -> String {
    let mut delimiter = String::from("ghadelimiter");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}

/// Formats one output as the legacy stdout workflow command.
fn legacy_command(name: &str, value: &str) -> String {
    format!("::set-output name={name}::{}", escape_data(value))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Writes the rendered JSON to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`diffset_core::DiffsetError::Io`] on any filesystem failure.
/// No cleanup is attempted for partially written files.
pub fn write_json_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}
