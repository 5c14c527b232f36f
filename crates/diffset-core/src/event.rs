use crate::error::DiffsetError;
use crate::Result;

/// The triggering event, reduced to the fields range resolution needs.
///
/// Exactly two event kinds carry a usable comparison range. A pull request
/// compares its base branch tip against its head across possibly different
/// owners (forks); a push compares the ref before the push against the ref
/// after it, within a single owner. Everything else is [`ChangeEvent::Other`]
/// and resolves to nothing.
///
/// Pull request fields are optional because the upstream payload does not
/// guarantee them; a missing or empty field makes the range unresolvable
/// rather than an error.
///
/// # Examples
///
/// ```
/// use diffset_core::ChangeEvent;
///
/// let event = ChangeEvent::Push {
///     before_sha: "aaa".into(),
///     after_sha: "bbb".into(),
///     owner: "org1".into(),
/// };
/// let range = event.resolve().unwrap();
/// assert_eq!(range.basehead(), "org1:aaa...org1:bbb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A pull request event; owners may differ when the head is a fork.
    PullRequest {
        /// Commit at the tip of the base branch.
        base_sha: Option<String>,
        /// Login owning the base repository.
        base_owner: Option<String>,
        /// Commit at the tip of the head branch.
        head_sha: Option<String>,
        /// Login owning the head repository.
        head_owner: Option<String>,
    },
    /// A push event; both ends live under the same owner.
    Push {
        /// Commit the ref pointed at before the push.
        before_sha: String,
        /// Commit the ref points at after the push.
        after_sha: String,
        /// Owner of the repository that was pushed to.
        owner: String,
    },
    /// Any event kind this action does not handle.
    Other,
}

impl ChangeEvent {
    /// Resolves the event to a comparison range, or `None` when the event
    /// kind is unhandled or any required field is missing or empty.
    ///
    /// An unresolved range is not an error: the pipeline completes with an
    /// empty change set.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffset_core::ChangeEvent;
    ///
    /// assert!(ChangeEvent::Other.resolve().is_none());
    ///
    /// let partial = ChangeEvent::PullRequest {
    ///     base_sha: Some("aaa".into()),
    ///     base_owner: Some("org1".into()),
    ///     head_sha: None,
    ///     head_owner: Some("org2".into()),
    /// };
    /// assert!(partial.resolve().is_none());
    /// ```
    pub fn resolve(&self) -> Option<CommitRange> {
        let (base_owner, base_ref, head_owner, head_ref) = match self {
            ChangeEvent::PullRequest {
                base_sha,
                base_owner,
                head_sha,
                head_owner,
            } => (
                base_owner.clone()?,
                base_sha.clone()?,
                head_owner.clone()?,
                head_sha.clone()?,
            ),
            ChangeEvent::Push {
                before_sha,
                after_sha,
                owner,
            } => (
                owner.clone(),
                before_sha.clone(),
                owner.clone(),
                after_sha.clone(),
            ),
            ChangeEvent::Other => return None,
        };
        if base_owner.is_empty()
            || base_ref.is_empty()
            || head_owner.is_empty()
            || head_ref.is_empty()
        {
            return None;
        }
        Some(CommitRange {
            base_owner,
            base_ref,
            head_owner,
            head_ref,
        })
    }
}

/// A fully resolved comparison range.
///
/// All four fields are non-empty; construction goes through
/// [`ChangeEvent::resolve`], which enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Login owning the base side.
    pub base_owner: String,
    /// Base commit reference.
    pub base_ref: String,
    /// Login owning the head side.
    pub head_owner: String,
    /// Head commit reference.
    pub head_ref: String,
}

impl CommitRange {
    /// Renders the range as the compare service's basehead key:
    /// `<baseOwner>:<base>...<headOwner>:<head>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffset_core::CommitRange;
    ///
    /// let range = CommitRange {
    ///     base_owner: "octocat".into(),
    ///     base_ref: "abc123".into(),
    ///     head_owner: "forker".into(),
    ///     head_ref: "def456".into(),
    /// };
    /// assert_eq!(range.basehead(), "octocat:abc123...forker:def456");
    /// ```
    pub fn basehead(&self) -> String {
        format!(
            "{}:{}...{}:{}",
            self.base_owner, self.base_ref, self.head_owner, self.head_ref
        )
    }
}

/// The repository hosting the comparison, as `owner/name`.
///
/// # Examples
///
/// ```
/// use diffset_core::Repository;
///
/// let repo = Repository::parse("octocat/hello-world").unwrap();
/// assert_eq!(repo.owner, "octocat");
/// assert_eq!(repo.name, "hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name without the owner prefix.
    pub name: String,
}

impl Repository {
    /// Parses an `owner/name` slug, as delivered in `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Event`] when the slug has no `/` separator or
    /// either side is empty.
    pub fn parse(slug: &str) -> Result<Self> {
        let (owner, name) = slug.split_once('/').ok_or_else(|| {
            DiffsetError::Event(format!("invalid repository slug '{slug}', expected owner/name"))
        })?;
        if owner.is_empty() || name.is_empty() {
            return Err(DiffsetError::Event(format!(
                "invalid repository slug '{slug}', expected owner/name"
            )));
        }
        Ok(Repository {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}
