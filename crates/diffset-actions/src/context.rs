use serde::Deserialize;

use diffset_core::{ChangeEvent, DiffsetError, Repository, Result};

/// Event context assembled from the runner's environment.
///
/// The runner describes the trigger through three pieces: the event name
/// (`GITHUB_EVENT_NAME`), the webhook payload written to disk
/// (`GITHUB_EVENT_PATH`), and the hosting repository slug
/// (`GITHUB_REPOSITORY`). All three are required; a payload that is not
/// valid JSON is fatal regardless of event kind.
///
/// # Examples
///
/// ```
/// use diffset_actions::context::ActionContext;
/// use diffset_core::{ChangeEvent, Repository};
///
/// let repo = Repository::parse("org1/widgets").unwrap();
/// let ctx = ActionContext::from_parts("workflow_dispatch", "{}", repo).unwrap();
/// assert_eq!(ctx.event, ChangeEvent::Other);
/// ```
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The trigger, reduced to the fields range resolution needs.
    pub event: ChangeEvent,
    /// Repository hosting the comparison.
    pub repo: Repository,
}

/// Webhook payload, limited to the nodes this action reads.
///
/// Every node is optional; upstream omits them freely depending on event
/// kind. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct WebhookPayload {
    pull_request: Option<PullRequestPayload>,
    before: Option<String>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    base: Option<CommitRefPayload>,
    head: Option<CommitRefPayload>,
}

#[derive(Debug, Deserialize)]
struct CommitRefPayload {
    sha: Option<String>,
    user: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: Option<String>,
}

impl ActionContext {
    /// Builds the context from the runner's environment.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Event`] when a required variable is unset,
    /// the payload file cannot be read, its JSON is malformed, or the
    /// repository slug is invalid.
    pub fn from_env() -> Result<Self> {
        let event_name = require_env("GITHUB_EVENT_NAME")?;
        let payload_path = require_env("GITHUB_EVENT_PATH")?;
        let payload = std::fs::read_to_string(&payload_path).map_err(|e| {
            DiffsetError::Event(format!(
                "failed to read event payload from {payload_path}: {e}"
            ))
        })?;
        let repo = Repository::parse(&require_env("GITHUB_REPOSITORY")?)?;
        Self::from_parts(&event_name, &payload, repo)
    }

    /// Builds the context from explicit parts.
    ///
    /// `pull_request` events take both shas and owner logins from the
    /// payload; `push` events take before/after from the payload and use the
    /// repository owner for both sides; every other name maps to
    /// [`ChangeEvent::Other`]. Missing payload nodes become missing event
    /// fields, which the resolver later treats as an unresolvable range.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Event`] when the payload is not valid JSON.
    pub fn from_parts(event_name: &str, payload_json: &str, repo: Repository) -> Result<Self> {
        let payload: WebhookPayload = serde_json::from_str(payload_json)
            .map_err(|e| DiffsetError::Event(format!("malformed event payload: {e}")))?;

        let event = match event_name {
            "pull_request" => {
                let pr = payload.pull_request.as_ref();
                let base = pr.and_then(|p| p.base.as_ref());
                let head = pr.and_then(|p| p.head.as_ref());
                ChangeEvent::PullRequest {
                    base_sha: base.and_then(|c| c.sha.clone()),
                    base_owner: base
                        .and_then(|c| c.user.as_ref())
                        .and_then(|u| u.login.clone()),
                    head_sha: head.and_then(|c| c.sha.clone()),
                    head_owner: head
                        .and_then(|c| c.user.as_ref())
                        .and_then(|u| u.login.clone()),
                }
            }
            "push" => ChangeEvent::Push {
                before_sha: payload.before.unwrap_or_default(),
                after_sha: payload.after.unwrap_or_default(),
                owner: repo.owner.clone(),
            },
            _ => ChangeEvent::Other,
        };

        Ok(ActionContext { event, repo })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DiffsetError::Event(format!("{name} is not set")))
}
