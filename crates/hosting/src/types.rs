//! Serde mirrors of the hosting API's JSON payloads, reduced to the
//! fields the engine renders.

use serde::Deserialize;

/// A repository in the tracked organization.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// One entry of `GET /repos/{org}/{repo}/commits` (most recent first).
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
}

/// One entry of `GET /repos/{org}/{repo}/branches`.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
}
