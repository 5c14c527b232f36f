use diffset_core::{CompareResponse, DiffsetError, Repository, Result};

use crate::classify::CompareOracle;

/// GitHub-backed compare oracle.
///
/// Wraps an authenticated octocrab client and answers comparisons through
/// the `GET /repos/{owner}/{repo}/compare/{basehead}` endpoint. One request
/// per classification; no retries.
#[derive(Debug)]
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
}

impl GitHubClient {
    /// Creates a client for the given token.
    ///
    /// `base_uri` overrides the API host (GitHub Enterprise); `None` keeps
    /// octocrab's default of `api.github.com`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffsetError::Oracle`] when `base_uri` is not a valid URI
    /// or the client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diffset_compare::github::GitHubClient;
    ///
    /// let client = GitHubClient::new("ghp_xxxx", None).unwrap();
    /// ```
    pub fn new(token: &str, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = octocrab::Octocrab::builder().personal_token(token.to_string());
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| DiffsetError::Oracle(format!("invalid API base URI '{uri}': {e}")))?;
        }
        let octocrab = builder
            .build()
            .map_err(|e| DiffsetError::Oracle(format!("failed to create GitHub client: {e}")))?;
        Ok(Self { octocrab })
    }
}

impl CompareOracle for GitHubClient {
    async fn compare(&self, repo: &Repository, basehead: &str) -> Result<CompareResponse> {
        let route = format!("/repos/{}/{}/compare/{}", repo.owner, repo.name, basehead);
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| DiffsetError::Oracle(format!("GitHub compare request failed: {e}")))
    }
}
