//! Host username lookup from a git email address

use crate::config::placeholders;
use anyhow::{Context as _, Result, anyhow};
use core::time::Duration;
use serde::Deserialize;
use tracing::debug;

const GITHUB_USER_SEARCH_URL: &str = "https://api.github.com/search/users";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a host username from an email address
pub trait UsernameLookup: Send + Sync {
    /// Find the username owning `email`
    ///
    /// # Errors
    ///
    /// Returns an error if no user is found or the lookup itself fails
    fn lookup(&self, email: &str) -> Result<String>;
}

/// Resolve the username for `email`, degrading to the placeholder
///
/// The lookup is never attempted for the placeholder email.
#[must_use]
pub fn resolve_username(lookup: &dyn UsernameLookup, email: &str) -> String {
    if email == placeholders::EMAIL {
        return placeholders::USERNAME.to_owned();
    }

    match lookup.lookup(email) {
        Ok(username) => username,
        Err(err) => {
            debug!("Username lookup for {} failed: {:#}", email, err);
            placeholders::USERNAME.to_owned()
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserSearchResponse {
    #[serde(default)]
    items: Vec<UserSearchItem>,
}

#[derive(Debug, Deserialize)]
struct UserSearchItem {
    login: String,
}

/// Looks users up through the GitHub user search API
#[derive(Debug, Clone, Default)]
pub struct GitHubUsernameLookup {
    token: Option<String>,
}

impl GitHubUsernameLookup {
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self { token: None }
    }

    /// Authenticate requests to lift the anonymous rate limit
    #[must_use]
    #[inline]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

impl UsernameLookup for GitHubUsernameLookup {
    fn lookup(&self, email: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gwi/", env!("CARGO_PKG_VERSION")))
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let mut request = client
            .get(GITHUB_USER_SEARCH_URL)
            .query(&[("q", format!("{email} in:email"))]);
        if let Some(token) = self.token.as_ref() {
            request = request.bearer_auth(token);
        }

        let response: UserSearchResponse = request
            .send()
            .context("GitHub user search request failed")?
            .error_for_status()
            .context("GitHub user search returned an error status")?
            .json()
            .context("Failed to decode GitHub user search response")?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.login)
            .ok_or_else(|| anyhow!("Couldn't find username for {email}"))
    }
}
