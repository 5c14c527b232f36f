use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DiffsetError;
use crate::Result;

/// Ordering of a head commit relative to its base, as reported by the
/// compare service.
///
/// Only [`CompareStatus::Ahead`] allows classification to proceed; every
/// other value rejects the range. A wire value outside this set fails
/// deserialization, which surfaces as a compare failure rather than a
/// silent reinterpretation.
///
/// # Examples
///
/// ```
/// use diffset_core::CompareStatus;
///
/// let s: CompareStatus = serde_json::from_str("\"ahead\"").unwrap();
/// assert_eq!(s, CompareStatus::Ahead);
/// assert!(serde_json::from_str::<CompareStatus>("\"sideways\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareStatus {
    /// Head contains commits the base does not; the only acceptable state.
    Ahead,
    /// Head is missing commits the base has.
    Behind,
    /// Head and base point at the same commit.
    Identical,
    /// Head and base have both moved since their common ancestor.
    Diverged,
}

impl fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareStatus::Ahead => write!(f, "ahead"),
            CompareStatus::Behind => write!(f, "behind"),
            CompareStatus::Identical => write!(f, "identical"),
            CompareStatus::Diverged => write!(f, "diverged"),
        }
    }
}

/// One changed file as reported by the compare service.
///
/// The status is kept as the raw wire string; [`FileStatus::parse`] turns it
/// into a bucket. Unknown response fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the file, relative to the repository root.
    pub filename: String,
    /// Raw change status string from the wire.
    pub status: String,
}

/// The compare service's answer for one base...head range.
///
/// `files` is optional because the service may omit the list entirely; the
/// classifier treats that as a failed comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// Ordering of head relative to base.
    pub status: CompareStatus,
    /// Changed files, in the order the service reported them.
    pub files: Option<Vec<FileChange>>,
}

/// Change classification a file lands in.
///
/// The mapping from wire status to bucket is total: the four known statuses
/// map to their bucket, and anything else maps to `None`, which keeps the
/// file out of every typed bucket while still counting it in `all`.
///
/// # Examples
///
/// ```
/// use diffset_core::FileStatus;
///
/// assert_eq!(FileStatus::parse("added"), Some(FileStatus::Added));
/// assert_eq!(FileStatus::parse("copied"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File did not exist at base and exists at head.
    Added,
    /// File exists at both ends with different contents.
    Modified,
    /// File existed at base and does not exist at head.
    Removed,
    /// File moved to a new path; reported under the new name.
    Renamed,
}

impl FileStatus {
    /// Maps a raw wire status to a bucket, or `None` for a status this
    /// version does not recognize.
    pub fn parse(status: &str) -> Option<FileStatus> {
        match status {
            "added" => Some(FileStatus::Added),
            "modified" => Some(FileStatus::Modified),
            "removed" => Some(FileStatus::Removed),
            "renamed" => Some(FileStatus::Renamed),
            _ => None,
        }
    }
}

/// The classified change set: every changed path plus one list per bucket.
///
/// List order follows the compare service's file order. A path appears in
/// `all` exactly once per reported change, and in at most one typed bucket;
/// duplicates from the service pass through untouched.
///
/// # Examples
///
/// ```
/// use diffset_core::ClassifiedDiff;
///
/// let diff = ClassifiedDiff::default();
/// assert!(diff.all.is_empty());
/// assert_eq!(diff.to_json(false).unwrap(), r#"{"all":[],"added":[],"modified":[],"removed":[],"renamed":[]}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDiff {
    /// Every changed path, regardless of status.
    pub all: Vec<String>,
    /// Paths with status `added`.
    pub added: Vec<String>,
    /// Paths with status `modified`.
    pub modified: Vec<String>,
    /// Paths with status `removed`.
    pub removed: Vec<String>,
    /// Paths with status `renamed`.
    pub renamed: Vec<String>,
}

impl ClassifiedDiff {
    /// Renders the change set as JSON.
    ///
    /// Compact single-line output by default; `pretty` switches to
    /// four-space indentation. Both forms carry the same value.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Serialization`] if encoding fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if !pretty {
            return Ok(serde_json::to_string(self)?);
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(DiffsetError::Serialization)?;
        Ok(String::from_utf8(buf).expect("serde_json emits valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_status_deserializes_lowercase() {
        let s: CompareStatus = serde_json::from_str("\"behind\"").unwrap();
        assert_eq!(s, CompareStatus::Behind);
        let s: CompareStatus = serde_json::from_str("\"diverged\"").unwrap();
        assert_eq!(s, CompareStatus::Diverged);
    }

    #[test]
    fn compare_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<CompareStatus>("\"sideways\"").is_err());
        assert!(serde_json::from_str::<CompareStatus>("\"Ahead\"").is_err());
    }

    #[test]
    fn compare_status_display() {
        assert_eq!(CompareStatus::Ahead.to_string(), "ahead");
        assert_eq!(CompareStatus::Behind.to_string(), "behind");
        assert_eq!(CompareStatus::Identical.to_string(), "identical");
        assert_eq!(CompareStatus::Diverged.to_string(), "diverged");
    }

    #[test]
    fn file_status_parses_known_values() {
        assert_eq!(FileStatus::parse("added"), Some(FileStatus::Added));
        assert_eq!(FileStatus::parse("modified"), Some(FileStatus::Modified));
        assert_eq!(FileStatus::parse("removed"), Some(FileStatus::Removed));
        assert_eq!(FileStatus::parse("renamed"), Some(FileStatus::Renamed));
    }

    #[test]
    fn file_status_rejects_unknown_values() {
        assert_eq!(FileStatus::parse("copied"), None);
        assert_eq!(FileStatus::parse("changed"), None);
        assert_eq!(FileStatus::parse("Added"), None);
        assert_eq!(FileStatus::parse(""), None);
    }

    #[test]
    fn compare_response_ignores_extra_fields() {
        let body = r#"{
            "status": "ahead",
            "ahead_by": 3,
            "total_commits": 3,
            "files": [{"filename": "src/lib.rs", "status": "modified", "additions": 10}]
        }"#;
        let response: CompareResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, CompareStatus::Ahead);
        let files = response.files.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "src/lib.rs");
        assert_eq!(files[0].status, "modified");
    }

    #[test]
    fn compare_response_files_may_be_absent() {
        let response: CompareResponse = serde_json::from_str(r#"{"status": "ahead"}"#).unwrap();
        assert!(response.files.is_none());
    }

    #[test]
    fn empty_diff_renders_compact() {
        let json = ClassifiedDiff::default().to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"all":[],"added":[],"modified":[],"removed":[],"renamed":[]}"#
        );
    }

    #[test]
    fn pretty_output_uses_four_space_indent() {
        let diff = ClassifiedDiff {
            all: vec!["f1".into()],
            added: vec!["f1".into()],
            ..Default::default()
        };
        let json = diff.to_json(true).unwrap();
        assert!(json.contains("\n    \"all\": ["));
        assert!(json.contains("\n        \"f1\""));
        assert!(!json.contains("\n  \"all\""));
    }

    #[test]
    fn pretty_and_compact_carry_the_same_value() {
        let diff = ClassifiedDiff {
            all: vec!["a".into(), "b".into()],
            modified: vec!["a".into()],
            removed: vec!["b".into()],
            ..Default::default()
        };
        let compact: serde_json::Value =
            serde_json::from_str(&diff.to_json(false).unwrap()).unwrap();
        let pretty: serde_json::Value = serde_json::from_str(&diff.to_json(true).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn rendering_is_deterministic() {
        let diff = ClassifiedDiff {
            all: vec!["x".into(), "y".into(), "z".into()],
            added: vec!["x".into()],
            modified: vec!["y".into()],
            removed: vec!["z".into()],
            ..Default::default()
        };
        assert_eq!(diff.to_json(false).unwrap(), diff.to_json(false).unwrap());
        assert_eq!(diff.to_json(true).unwrap(), diff.to_json(true).unwrap());
    }
}
