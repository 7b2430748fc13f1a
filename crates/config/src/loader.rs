use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_env, schema::ForgecordConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["forgecord.toml", "forgecord.json"];

/// Load config from the given path (TOML or JSON by extension).
pub fn load_config(path: &Path) -> Result<ForgecordConfig, Error> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

fn parse_config(raw: &str, path: &Path) -> Result<ForgecordConfig, Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "json" => serde_json::from_str(raw).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => toml::from_str(raw).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Discover and load config from standard locations, then apply env
/// overrides.
///
/// Search order:
/// 1. `./forgecord.{toml,json}` (project-local)
/// 2. `~/.config/forgecord/forgecord.{toml,json}` (user-global)
///
/// Returns `ForgecordConfig::default()` (plus env overrides) if no config
/// file is found.
pub fn discover_and_load() -> ForgecordConfig {
    let mut cfg = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            match load_config(&path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                    ForgecordConfig::default()
                },
            }
        },
        None => {
            debug!("no config file found, using defaults");
            ForgecordConfig::default()
        },
    };
    apply_env_overrides(&mut cfg);
    cfg
}

/// Apply `FORGECORD_*` environment overrides on top of a loaded config.
pub fn apply_env_overrides(cfg: &mut ForgecordConfig) {
    apply_overrides_with(cfg, |name| std::env::var(name).ok());
}

fn apply_overrides_with(cfg: &mut ForgecordConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("FORGECORD_DISCORD_TOKEN") {
        cfg.discord.token = Secret::new(token);
    }
    if let Some(token) = lookup("FORGECORD_GITHUB_TOKEN") {
        cfg.hosting.token = Secret::new(token);
    }
    if let Some(org) = lookup("FORGECORD_GITHUB_ORG") {
        cfg.hosting.org = org;
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/forgecord/
    if let Some(dir) = config_dir() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/forgecord/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "forgecord").map(|d| d.config_dir().to_path_buf())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use {secrecy::ExposeSecret, std::io::Write};

    use super::*;

    #[test]
    fn loads_toml_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forgecord.toml");
        let mut f = std::fs::File::create(&path).expect("create");
        writeln!(f, "[hosting]\norg = \"acme\"").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.hosting.org, "acme");
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forgecord.json");
        std::fs::write(&path, r#"{"notify": {"branch": "trunk"}}"#).expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.notify.branch, "trunk");
    }

    #[test]
    fn parse_error_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forgecord.toml");
        std::fs::write(&path, "not = [valid").expect("write");

        let err = load_config(&path).expect_err("should fail");
        assert!(err.to_string().contains("forgecord.toml"));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut cfg: ForgecordConfig =
            toml::from_str("[hosting]\norg = \"from-file\"").expect("parse");
        apply_overrides_with(&mut cfg, |name| {
            (name == "FORGECORD_GITHUB_ORG").then(|| "override-org".to_string())
        });
        assert_eq!(cfg.hosting.org, "override-org");
        assert!(cfg.discord.token.expose_secret().is_empty());
    }
}
