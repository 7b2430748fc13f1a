//! Recording/faking doubles shared by the engine tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;

use forgecord_hosting::{
    Branch, Commit, CommitAuthor, CommitDetail, Error as HostingError, RepoSource, Repository,
    Result as HostingResult,
};

use crate::{
    error::{Error, Result},
    outbound::{ChannelId, ChatOutbound, DestinationId},
    panel::ActionPanel,
};

pub fn commit(message: &str, author: &str) -> Commit {
    Commit {
        sha: "0000000".into(),
        html_url: format!("https://github.test/commit/{}", message.replace(' ', "-")),
        commit: CommitDetail {
            message: message.into(),
            author: CommitAuthor {
                name: author.into(),
            },
        },
    }
}

/// In-memory [`RepoSource`] with per-repo commit/branch fixtures.
pub struct FakeSource {
    repos: Vec<String>,
    commits: HashMap<String, Vec<Commit>>,
    branches: HashMap<String, Vec<Branch>>,
    fail_status: Option<u16>,
}

impl FakeSource {
    pub fn new(repos: Vec<&str>) -> Self {
        Self {
            repos: repos.into_iter().map(String::from).collect(),
            commits: HashMap::new(),
            branches: HashMap::new(),
            fail_status: None,
        }
    }

    /// Every query fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            repos: Vec::new(),
            commits: HashMap::new(),
            branches: HashMap::new(),
            fail_status: Some(status),
        }
    }

    pub fn with_commits(mut self, repo: &str, commits: Vec<Commit>) -> Self {
        self.commits.insert(repo.into(), commits);
        self
    }

    pub fn with_branches(mut self, repo: &str, names: &[&str]) -> Self {
        self.branches.insert(
            repo.into(),
            names.iter().map(|n| Branch { name: (*n).into() }).collect(),
        );
        self
    }

    fn check(&self) -> HostingResult<()> {
        match self.fail_status {
            Some(status) => Err(HostingError::status(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn list_repositories(&self, _org: &str) -> HostingResult<Vec<Repository>> {
        self.check()?;
        Ok(self
            .repos
            .iter()
            .map(|name| Repository { name: name.clone() })
            .collect())
    }

    async fn recent_commits(&self, _org: &str, repo: &str) -> HostingResult<Vec<Commit>> {
        self.check()?;
        Ok(self.commits.get(repo).cloned().unwrap_or_default())
    }

    async fn branches(&self, _org: &str, repo: &str) -> HostingResult<Vec<Branch>> {
        self.check()?;
        Ok(self.branches.get(repo).cloned().unwrap_or_default())
    }
}

/// Everything the engine asked the chat platform to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ChannelNames(DestinationId),
    CreateChannel(DestinationId, String),
    SendText(ChannelId, String),
    SendPanel(ChannelId, String),
    FindChannel(DestinationId, String),
}

/// [`ChatOutbound`] double: tracks channels per destination and records
/// every call.
pub struct RecordingChat {
    channels: Mutex<HashMap<DestinationId, Vec<(ChannelId, String)>>>,
    calls: Mutex<Vec<Call>>,
    fail_create: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_create: Mutex::new(HashSet::new()),
            next_id: AtomicU64::new(100),
        }
    }

    pub fn add_destination(&self, dest: DestinationId, channel_names: &[&str]) {
        let mut channels = self.channels.lock().expect("channels lock");
        let entry = channels.entry(dest).or_default();
        for name in channel_names {
            let id = ChannelId(self.next_id.fetch_add(1, Ordering::Relaxed));
            entry.push((id, (*name).to_string()));
        }
    }

    /// Make `create_channel` fail for this repository name.
    pub fn fail_creation_of(&self, name: &str) {
        self.fail_create
            .lock()
            .expect("fail_create lock")
            .insert(name.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn channel_names_of(&self, dest: DestinationId) -> Vec<String> {
        self.channels
            .lock()
            .expect("channels lock")
            .get(&dest)
            .map(|chs| chs.iter().map(|(_, name)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl ChatOutbound for RecordingChat {
    async fn channel_names(&self, dest: DestinationId) -> Result<Vec<String>> {
        self.record(Call::ChannelNames(dest));
        Ok(self.channel_names_of(dest))
    }

    async fn create_channel(&self, dest: DestinationId, name: &str) -> Result<ChannelId> {
        if self
            .fail_create
            .lock()
            .expect("fail_create lock")
            .contains(name)
        {
            return Err(Error::message(format!("create channel {name}: denied")));
        }
        self.record(Call::CreateChannel(dest, name.into()));
        let id = ChannelId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.channels
            .lock()
            .expect("channels lock")
            .entry(dest)
            .or_default()
            .push((id, name.into()));
        Ok(id)
    }

    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()> {
        self.record(Call::SendText(channel, text.into()));
        Ok(())
    }

    async fn send_panel(&self, channel: ChannelId, _text: &str, panel: &ActionPanel) -> Result<()> {
        self.record(Call::SendPanel(channel, panel.repo.clone()));
        Ok(())
    }

    async fn find_channel(&self, dest: DestinationId, name: &str) -> Result<Option<ChannelId>> {
        self.record(Call::FindChannel(dest, name.into()));
        Ok(self
            .channels
            .lock()
            .expect("channels lock")
            .get(&dest)
            .and_then(|chs| chs.iter().find(|(_, n)| n == name).map(|(id, _)| *id)))
    }
}
