//! Query surface over the repository-hosting platform (GitHub REST API).
//!
//! A thin request/response layer: list an organization's repositories,
//! list a repository's commits (most recent first), list its branches.
//! No caching, no retries, no pagination; callers truncate the default
//! page instead of requesting a bounded one.

pub mod client;
pub mod error;
pub mod types;

pub use {
    client::{HostingClient, RepoSource},
    error::{Error, Result},
    types::{Branch, Commit, CommitAuthor, CommitDetail, Repository},
};
