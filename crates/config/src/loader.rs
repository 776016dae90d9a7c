use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::NovaConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["nova.toml", "nova.yaml", "nova.yml", "nova.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<NovaConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./nova.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/nova/nova.{toml,yaml,yml,json}` (user-global)
///
/// Returns `NovaConfig::default()` if no config file is found.
pub fn discover_and_load() -> NovaConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    NovaConfig::default()
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

    // User-global: ~/.config/nova/
    if let Some(dirs) = directories::ProjectDirs::from("", "", "nova") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/nova/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "nova").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<NovaConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "nova.toml",
            r#"
                [providers]
                selected = "anthropic"
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.providers.selected.as_deref(), Some("anthropic"));
    }

    #[test]
    fn loads_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "nova.json",
            r#"{ "providers": { "selected": "llama" } }"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.providers.selected.as_deref(), Some("llama"));
    }

    #[test]
    fn substitutes_env_vars_in_config() {
        // Mutating the environment is unsafe in edition 2024, so lean on a
        // variable the test runner already has.
        let Ok(path_var) = std::env::var("PATH") else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "nova.json",
            r#"{ "providers": { "openai": { "api_key": "${PATH}" } } }"#,
        );

        let config = load_config(&path).unwrap();
        let key = config.providers.api_key("openai").unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(key), &path_var);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "nova.ini", "selected=openai");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/nova.toml")).is_err());
    }
}
