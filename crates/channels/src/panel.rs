//! Per-repository interactive query actions.
//!
//! Each created channel gets one panel message with three buttons. The
//! button custom id carries the action variant and the repository name,
//! so pressing a button needs no per-instance state on our side: the
//! handler parses the id, runs one hosting query, and renders a reply.

use forgecord_hosting::{Branch, Commit, Error as HostingError, RepoSource};

/// Custom-id namespace for panel buttons. Foreign component ids (other
/// bots, other features) never match it and are ignored.
const COMPONENT_ID_PREFIX: &str = "repo";

const RECENT_CHANGES_LIMIT: usize = 5;

/// The three query actions attached to a repository's channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    LastCommit,
    RecentChanges,
    Branches,
}

impl RepoAction {
    pub const ALL: [Self; 3] = [Self::LastCommit, Self::RecentChanges, Self::Branches];

    pub fn label(self) -> &'static str {
        match self {
            Self::LastCommit => "Last commit",
            Self::RecentChanges => "Recent changes",
            Self::Branches => "Branches",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::LastCommit => "last-commit",
            Self::RecentChanges => "recent-changes",
            Self::Branches => "branches",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "last-commit" => Some(Self::LastCommit),
            "recent-changes" => Some(Self::RecentChanges),
            "branches" => Some(Self::Branches),
            _ => None,
        }
    }

    /// What the action fetches, for error text.
    fn describes(self) -> &'static str {
        match self {
            Self::LastCommit => "the latest commit",
            Self::RecentChanges => "recent changes",
            Self::Branches => "branches",
        }
    }

    /// Component custom id: `repo:<slug>:<repository-name>`.
    pub fn component_id(self, repo: &str) -> String {
        format!("{COMPONENT_ID_PREFIX}:{}:{repo}", self.slug())
    }

    /// Inverse of [`component_id`]. Returns `None` for ids outside our
    /// namespace.
    ///
    /// [`component_id`]: Self::component_id
    pub fn parse_component_id(id: &str) -> Option<(Self, &str)> {
        let rest = id.strip_prefix(COMPONENT_ID_PREFIX)?.strip_prefix(':')?;
        let (slug, repo) = rest.split_once(':')?;
        if repo.is_empty() {
            return None;
        }
        Some((Self::from_slug(slug)?, repo))
    }
}

/// The action panel bound to one repository name.
#[derive(Debug, Clone)]
pub struct ActionPanel {
    pub repo: String,
}

/// One button of the rendered panel.
#[derive(Debug, Clone)]
pub struct PanelButton {
    pub custom_id: String,
    pub label: &'static str,
}

impl ActionPanel {
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into() }
    }

    /// Message text the panel is attached to.
    pub fn prompt(&self) -> String {
        format!("Inspect `{}`:", self.repo)
    }

    pub fn buttons(&self) -> Vec<PanelButton> {
        RepoAction::ALL
            .into_iter()
            .map(|action| PanelButton {
                custom_id: action.component_id(&self.repo),
                label: action.label(),
            })
            .collect()
    }
}

/// Run one action to completion and render the reply text.
///
/// Read-only and repeatable: one hosting query, one formatted string.
/// Hosting failures are rendered into the reply (with the status code),
/// never propagated.
pub async fn run_action(
    action: RepoAction,
    repo: &str,
    source: &dyn RepoSource,
    org: &str,
) -> String {
    let result = match action {
        RepoAction::LastCommit => source
            .recent_commits(org, repo)
            .await
            .map(|commits| render_last_commit(repo, &commits)),
        RepoAction::RecentChanges => source
            .recent_commits(org, repo)
            .await
            .map(|commits| render_recent_changes(repo, &commits)),
        RepoAction::Branches => source
            .branches(org, repo)
            .await
            .map(|branches| render_branches(repo, &branches)),
    };
    result.unwrap_or_else(|e| render_failure(action, repo, &e))
}

/// Recency is defined by API listing order: index 0 is the most recent
/// commit, no independent timestamp comparison.
pub fn render_last_commit(repo: &str, commits: &[Commit]) -> String {
    let Some(commit) = commits.first() else {
        return format!("`{repo}` has no commits yet.");
    };
    format!(
        "**Latest commit on `{repo}`**\nAuthor: {}\nMessage: {}\n{}",
        commit.commit.author.name, commit.commit.message, commit.html_url
    )
}

/// At most five commits, one `message — author` line each, API order.
pub fn render_recent_changes(repo: &str, commits: &[Commit]) -> String {
    if commits.is_empty() {
        return format!("`{repo}` has no commits yet.");
    }
    let lines: Vec<String> = commits
        .iter()
        .take(RECENT_CHANGES_LIMIT)
        .map(|c| format!("{} — {}", c.commit.message, c.commit.author.name))
        .collect();
    format!("**Recent changes in `{repo}`**\n{}", lines.join("\n"))
}

pub fn render_branches(repo: &str, branches: &[Branch]) -> String {
    if branches.is_empty() {
        return format!("`{repo}` has no branches.");
    }
    let lines: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    format!("**Branches in `{repo}`**\n{}", lines.join("\n"))
}

fn render_failure(action: RepoAction, repo: &str, err: &HostingError) -> String {
    format!("Failed to fetch {} for `{repo}`: {err}", action.describes())
}

#[cfg(test)]
mod tests {
    use crate::testutil::{FakeSource, commit};

    use super::*;

    #[test]
    fn component_id_round_trips() {
        for action in RepoAction::ALL {
            let id = action.component_id("alpha");
            assert_eq!(RepoAction::parse_component_id(&id), Some((action, "alpha")));
        }
    }

    #[test]
    fn foreign_component_ids_are_ignored() {
        assert_eq!(RepoAction::parse_component_id("other-bot:thing"), None);
        assert_eq!(RepoAction::parse_component_id("repo:unknown-action:x"), None);
        assert_eq!(RepoAction::parse_component_id("repo:branches:"), None);
        assert_eq!(RepoAction::parse_component_id(""), None);
    }

    #[test]
    fn panel_exposes_three_buttons() {
        let panel = ActionPanel::new("alpha");
        let buttons = panel.buttons();
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].custom_id, "repo:last-commit:alpha");
        assert_eq!(buttons[0].label, "Last commit");
    }

    #[test]
    fn last_commit_renders_index_zero_only() {
        let commits = vec![
            commit("newest", "ana"),
            commit("older", "bob"),
            commit("oldest", "cyn"),
        ];
        let text = render_last_commit("alpha", &commits);
        assert!(text.contains("newest"));
        assert!(text.contains("ana"));
        assert!(!text.contains("older"));
    }

    #[test]
    fn last_commit_includes_url() {
        let commits = vec![commit("fix", "ana")];
        let text = render_last_commit("alpha", &commits);
        assert!(text.contains(&commits[0].html_url));
    }

    #[test]
    fn recent_changes_truncates_to_five_in_order() {
        let commits: Vec<_> = (0..7)
            .map(|i| commit(&format!("change {i}"), "ana"))
            .collect();
        let text = render_recent_changes("alpha", &commits);
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "change 0 — ana");
        assert_eq!(lines[4], "change 4 — ana");
    }

    #[test]
    fn recent_changes_keeps_fewer_than_five() {
        let commits = vec![commit("only", "ana")];
        let text = render_recent_changes("alpha", &commits);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn branches_render_in_api_order() {
        let branches = vec![
            Branch { name: "main".into() },
            Branch { name: "dev".into() },
        ];
        let text = render_branches("alpha", &branches);
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines, ["main", "dev"]);
    }

    #[tokio::test]
    async fn action_failure_renders_status_code() {
        let source = FakeSource::failing(500);
        let text = run_action(RepoAction::LastCommit, "alpha", &source, "acme").await;
        assert!(text.contains("500"), "missing status in: {text}");
        assert!(text.contains("alpha"));
    }

    #[tokio::test]
    async fn branches_action_renders_via_source() {
        let source = FakeSource::new(vec![]).with_branches("alpha", &["main", "dev"]);
        let text = run_action(RepoAction::Branches, "alpha", &source, "acme").await;
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines, ["main", "dev"]);
    }

    #[tokio::test]
    async fn action_success_goes_through_source() {
        let source = FakeSource::new(vec![]).with_commits("alpha", vec![commit("fix bug", "ana")]);
        let text = run_action(RepoAction::LastCommit, "alpha", &source, "acme").await;
        assert!(text.contains("fix bug"));
        assert!(text.contains("ana"));
    }
}
