use diffset_core::{
    ClassifiedDiff, CommitRange, CompareResponse, CompareStatus, DiffsetError, FileChange,
    FileStatus, Repository, Result,
};

/// Source of comparison answers for a base...head range.
///
/// Production uses [`crate::github::GitHubClient`]; tests substitute stubs
/// so classification is exercised without the network.
#[allow(async_fn_in_trait)]
pub trait CompareOracle {
    /// Compares the range identified by `basehead` within `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Oracle`] when the comparison cannot be
    /// performed.
    async fn compare(&self, repo: &Repository, basehead: &str) -> Result<CompareResponse>;
}

/// Classifies the files changed across `range`.
///
/// An unresolved range (`None`) is a recognized no-op: the result is empty
/// and the oracle is never consulted. Otherwise the oracle is asked exactly
/// once, the response is validated, and the file list is partitioned into
/// buckets in the order the oracle reported it.
///
/// When `debug` is set, one line per file (`<filename> <status>`) is written
/// to stderr. Purely observational.
///
/// # Errors
///
/// - [`DiffsetError::Oracle`] when the comparison fails or the response
///   carries no file list.
/// - [`DiffsetError::Direction`] when head is not strictly ahead of base;
///   the error names the actual refs and the reported status.
pub async fn classify<O: CompareOracle>(
    range: Option<&CommitRange>,
    repo: &Repository,
    oracle: &O,
    debug: bool,
) -> Result<ClassifiedDiff> {
    let Some(range) = range else {
        return Ok(ClassifiedDiff::default());
    };

    let response = oracle.compare(repo, &range.basehead()).await?;
    let files = response.files.ok_or_else(|| {
        DiffsetError::Oracle(format!("no file list returned for {}", range.basehead()))
    })?;
    if response.status != CompareStatus::Ahead {
        return Err(DiffsetError::Direction {
            base: range.base_ref.clone(),
            head: range.head_ref.clone(),
            status: response.status,
        });
    }

    Ok(partition(files, debug))
}

/// Buckets each file by its wire status.
///
/// Every file lands in `all`; a recognized status additionally lands the
/// file in exactly one typed bucket, and an unrecognized one leaves it in
/// `all` only. Order and duplicates are preserved as reported.
pub fn partition(files: Vec<FileChange>, debug: bool) -> ClassifiedDiff {
    let mut diff = ClassifiedDiff::default();
    for file in files {
        if debug {
            eprintln!("{} {}", file.filename, file.status);
        }
        diff.all.push(file.filename.clone());
        match FileStatus::parse(&file.status) {
            Some(FileStatus::Added) => diff.added.push(file.filename),
            Some(FileStatus::Modified) => diff.modified.push(file.filename),
            Some(FileStatus::Removed) => diff.removed.push(file.filename),
            Some(FileStatus::Renamed) => diff.renamed.push(file.filename),
            None => {}
        }
    }
    diff
}
