use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgecordConfig {
    pub discord: DiscordSection,
    pub hosting: HostingSection,
    pub notify: NotifySection,
    pub webhook: WebhookSection,
}

/// Discord bot credentials.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordSection {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,
}

impl std::fmt::Debug for DiscordSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSection")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
        }
    }
}

/// Hosting-platform (GitHub) credentials and the tracked organization.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostingSection {
    /// Fine-grained or classic token with read access to the org's repos.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Organization whose repositories are mirrored into channels.
    pub org: String,

    /// API base URL. Overridable so tests can point at a local server.
    pub api_base: String,
}

impl std::fmt::Debug for HostingSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostingSection")
            .field("token", &"[REDACTED]")
            .field("org", &self.org)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for HostingSection {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            org: String::new(),
            api_base: "https://api.github.com".into(),
        }
    }
}

/// Push-notification policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySection {
    /// Only pushes to this branch are relayed to channels.
    pub branch: String,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            branch: "main".into(),
        }
    }
}

/// Webhook receiver bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    pub bind: String,
    pub port: u16,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8787,
        }
    }
}

impl ForgecordConfig {
    /// Validate startup requirements. Returns a list of human-readable
    /// problems; empty means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.discord.token.expose_secret().is_empty() {
            problems.push("discord.token is empty (set FORGECORD_DISCORD_TOKEN)".into());
        }
        if self.hosting.token.expose_secret().is_empty() {
            problems.push("hosting.token is empty (set FORGECORD_GITHUB_TOKEN)".into());
        }
        if self.hosting.org.is_empty() {
            problems.push("hosting.org is empty (set FORGECORD_GITHUB_ORG)".into());
        }
        if self.notify.branch.is_empty() {
            problems.push("notify.branch is empty".into());
        }
        problems
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
