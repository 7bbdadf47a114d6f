//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::{parse_catalog, Catalog};

/// Top-level majorchooser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChooserConfig {
    /// JSON file backing the key-value store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Catalog TOML replacing the built-in majors and default questions.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./majorchooser-store.json")
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            catalog_path: None,
        }
    }
}

impl ChooserConfig {
    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => parse_catalog(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).ok())
}

/// Substituted values are copied through as-is and never rescanned.
fn expand_vars(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `majorchooser.toml` in the current directory
/// 2. `~/.config/majorchooser/config.toml`
///
/// Environment variable overrides: `MAJORCHOOSER_STORE`, `MAJORCHOOSER_CATALOG`.
pub fn load_config_from(path: Option<&Path>) -> Result<ChooserConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("majorchooser.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ChooserConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ChooserConfig::default(),
    };

    Ok(apply_overrides(config, |name| std::env::var(name).ok()))
}

fn apply_overrides(
    mut config: ChooserConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ChooserConfig {
    if let Some(store) = lookup("MAJORCHOOSER_STORE") {
        config.store_path = PathBuf::from(store);
    }
    if let Some(catalog) = lookup("MAJORCHOOSER_CATALOG") {
        config.catalog_path = Some(PathBuf::from(catalog));
    }

    config.store_path = resolve_path(&config.store_path);
    config.catalog_path = config.catalog_path.as_deref().map(resolve_path);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("majorchooser"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MAJORCHOOSER_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MAJORCHOOSER_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MAJORCHOOSER_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_MAJORCHOOSER_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let lookup = |name: &str| match name {
            "SELF" => Some("${SELF}".to_string()),
            "DIR" => Some("/data".to_string()),
            _ => None,
        };
        assert_eq!(expand_vars("${SELF}/x", lookup), "${SELF}/x");
        assert_eq!(expand_vars("${DIR}/${SELF}", lookup), "/data/${SELF}");
        assert_eq!(expand_vars("${MISSING}/a/${DIR", lookup), "/a/${DIR");
    }

    #[test]
    fn default_config() {
        let config = ChooserConfig::default();
        assert_eq!(config.store_path, PathBuf::from("./majorchooser-store.json"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.catalog().unwrap(), Catalog::builtin());
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("majorchooser.toml");
        std::fs::write(
            &path,
            r#"
store_path = "/tmp/questions.json"
catalog_path = "catalog.toml"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/questions.json"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.toml")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/majorchooser.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn env_overrides_win() {
        let config = apply_overrides(ChooserConfig::default(), |name| match name {
            "MAJORCHOOSER_STORE" => Some("/data/store.json".into()),
            "MAJORCHOOSER_CATALOG" => Some("/data/catalog.toml".into()),
            _ => None,
        });
        assert_eq!(config.store_path, PathBuf::from("/data/store.json"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/data/catalog.toml")));
    }

    #[test]
    fn no_overrides_keeps_file_values() {
        let config = apply_overrides(ChooserConfig::default(), |_| None);
        assert_eq!(config, ChooserConfig::default());
    }
}
