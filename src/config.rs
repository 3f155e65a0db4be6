// config.rs — layered configuration (spec §9 ambient stack), following the
// daemon's CLI / env / TOML precedence: CLI flags and env vars win over
// `resolver.toml`, which wins over built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_LOG: &str = "info";
const DEFAULT_OVERRIDES_PATH: &str = "permission-overrides.json";
const DEFAULT_DISCOVERED_PATH: &str = "discovered.json";
const DEFAULT_RESOLVED_PATH: &str = "resolved.json";

/// `resolver.toml` — every field optional; CLI/env still win when set.
#[derive(Deserialize, Default)]
struct TomlConfig {
    overrides_path: Option<PathBuf>,
    discovered_path: Option<PathBuf>,
    resolved_path: Option<PathBuf>,
    log: Option<String>,
    pretty: Option<bool>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse resolver.toml — using defaults");
            None
        }
    }
}

/// Resolved runtime configuration for a single `resolve`/`check` invocation.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub overrides_path: PathBuf,
    pub discovered_path: PathBuf,
    pub resolved_path: PathBuf,
    pub log: String,
    pub pretty: bool,
}

impl ResolverConfig {
    /// Build config from CLI args + optional TOML file.
    ///
    /// Priority (highest to lowest): CLI flag > `PERM_*` env var >
    /// `resolver.toml` in the current directory > built-in default.
    pub fn new(
        overrides_path: Option<PathBuf>,
        discovered_path: Option<PathBuf>,
        resolved_path: Option<PathBuf>,
        log: Option<String>,
        pretty: Option<bool>,
    ) -> Self {
        let toml_path = std::env::var("PERM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("resolver.toml"));
        let toml = load_toml(&toml_path).unwrap_or_default();

        let overrides_path = overrides_path
            .or_else(|| std::env::var("PERM_OVERRIDES_PATH").ok().map(PathBuf::from))
            .or(toml.overrides_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OVERRIDES_PATH));

        let discovered_path = discovered_path
            .or_else(|| std::env::var("PERM_DISCOVERED_PATH").ok().map(PathBuf::from))
            .or(toml.discovered_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DISCOVERED_PATH));

        let resolved_path = resolved_path
            .or_else(|| std::env::var("PERM_RESOLVED_PATH").ok().map(PathBuf::from))
            .or(toml.resolved_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOLVED_PATH));

        let log = log
            .or_else(|| std::env::var("PERM_LOG").ok())
            .or(toml.log)
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        let pretty = pretty.or(toml.pretty).unwrap_or(true);

        Self { overrides_path, discovered_path, resolved_path, log, pretty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = ResolverConfig::new(None, None, None, None, None);
        assert_eq!(cfg.overrides_path, PathBuf::from(DEFAULT_OVERRIDES_PATH));
        assert_eq!(cfg.log, DEFAULT_LOG);
        assert!(cfg.pretty);
    }

    #[test]
    fn cli_values_take_precedence() {
        let cfg = ResolverConfig::new(
            Some(PathBuf::from("custom-overrides.json")),
            None,
            None,
            Some("debug".to_string()),
            Some(false),
        );
        assert_eq!(cfg.overrides_path, PathBuf::from("custom-overrides.json"));
        assert_eq!(cfg.log, "debug");
        assert!(!cfg.pretty);
    }
}
