use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    types::{Branch, Commit, Repository},
};

/// Production API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("forgecord/", env!("CARGO_PKG_VERSION"));

/// Read-only query source for repositories, commits, and branches.
///
/// The engine talks to this trait so tests can substitute an in-memory
/// implementation; [`HostingClient`] is the production one.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// All repositories of the organization, in API listing order.
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>>;

    /// A repository's commits, most recent first, platform default page
    /// size. Callers truncate rather than request a bounded page.
    async fn recent_commits(&self, org: &str, repo: &str) -> Result<Vec<Commit>>;

    /// A repository's branches, in API order.
    async fn branches(&self, org: &str, repo: &str) -> Result<Vec<Branch>>;
}

/// Hosting API client with a fixed bearer credential.
pub struct HostingClient {
    http: reqwest::Client,
    api_base: String,
    token: Secret<String>,
}

impl HostingClient {
    pub fn new(token: Secret<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Point the client at a non-default base URL (tests, GHE installs).
    pub fn with_api_base(token: Secret<String>, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self {
            http: reqwest::Client::new(),
            api_base,
            token,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, "hosting API request");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(Error::status(resp.status().as_u16()));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl RepoSource for HostingClient {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        self.get_json(&format!("/orgs/{org}/repos?type=all")).await
    }

    async fn recent_commits(&self, org: &str, repo: &str) -> Result<Vec<Commit>> {
        self.get_json(&format!("/repos/{org}/{repo}/commits")).await
    }

    async fn branches(&self, org: &str, repo: &str) -> Result<Vec<Branch>> {
        self.get_json(&format!("/repos/{org}/{repo}/branches")).await
    }
}
