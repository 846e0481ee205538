// src/config.rs
//! Builder configuration, passed explicitly to everything that needs it.
//!
//! Sources, lowest precedence first: built-in defaults, the `local` or
//! `production` section of `config.yaml`, then `FOLIO_*` environment
//! variables. Relative paths resolve against the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::autosave::DEFAULT_AUTOSAVE_INTERVAL;
use crate::storage::{KeyValueStore, StoreError, LANGUAGE_KEY};
use crate::types::Language;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub storage_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub typst_bin: PathBuf,
    pub autosave_interval: Duration,
    pub port: u16,
    /// Host locale (e.g. `ko_KR.UTF-8`), used when no language is stored
    pub locale: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".folio/storage"),
            output_dir: PathBuf::from("out"),
            scratch_dir: PathBuf::from(".folio/tmp"),
            typst_bin: PathBuf::from("typst"),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            port: DEFAULT_PORT,
            locale: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigSection {
    storage_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    scratch_dir: Option<PathBuf>,
    typst_bin: Option<PathBuf>,
    autosave_ms: Option<u64>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: ConfigSection,
    production: ConfigSection,
}

impl BuilderConfig {
    /// Load from `path` (or `./config.yaml` when present) and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        let yaml = match path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            ),
            None => {
                let default_path = base_dir.join(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Some(std::fs::read_to_string(&default_path).with_context(|| {
                        format!("Failed to read config file: {}", default_path.display())
                    })?)
                } else {
                    None
                }
            }
        };

        Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok(), &base_dir)
    }

    pub fn from_sources(
        yaml: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
        base_dir: &Path,
    ) -> Result<Self> {
        let environment = env("FOLIO_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::default();

        if let Some(yaml) = yaml {
            let file: ConfigFile =
                serde_yaml::from_str(yaml).context("Failed to parse config.yaml")?;
            let section = match environment.as_str() {
                "production" => file.production,
                _ => file.local,
            };
            config.apply_section(section);
        }

        if let Some(dir) = env("FOLIO_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("FOLIO_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("FOLIO_SCRATCH_DIR") {
            config.scratch_dir = PathBuf::from(dir);
        }
        if let Some(bin) = env("FOLIO_TYPST_BIN") {
            config.typst_bin = PathBuf::from(bin);
        }
        if let Some(ms) = env("FOLIO_AUTOSAVE_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("FOLIO_AUTOSAVE_MS must be a number of milliseconds, got {}", ms))?;
            config.autosave_interval = Duration::from_millis(ms);
        }
        if let Some(port) = env("ROCKET_PORT") {
            config.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }
        config.locale = env("LC_ALL").or_else(|| env("LANG"));

        if config.autosave_interval.is_zero() {
            anyhow::bail!("Autosave interval must be greater than zero");
        }

        config.storage_dir = resolve_path(base_dir, &config.storage_dir);
        config.output_dir = resolve_path(base_dir, &config.output_dir);
        config.scratch_dir = resolve_path(base_dir, &config.scratch_dir);
        Ok(config)
    }

    fn apply_section(&mut self, section: ConfigSection) {
        if let Some(dir) = section.storage_dir {
            self.storage_dir = dir;
        }
        if let Some(dir) = section.output_dir {
            self.output_dir = dir;
        }
        if let Some(dir) = section.scratch_dir {
            self.scratch_dir = dir;
        }
        if let Some(bin) = section.typst_bin {
            self.typst_bin = bin;
        }
        if let Some(ms) = section.autosave_ms {
            self.autosave_interval = Duration::from_millis(ms);
        }
        if let Some(port) = section.port {
            self.port = port;
        }
    }

    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage_dir = dir;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = dir;
        self
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Ensure all configured directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.storage_dir, &self.output_dir, &self.scratch_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

// ===== Language selection =====

/// Stored language, else the host locale, else English. A detected language
/// is written back so later sessions agree.
pub fn load_language(store: &dyn KeyValueStore, locale: Option<&str>) -> Language {
    let stored = match store.get(LANGUAGE_KEY) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Error reading language setting: {}", e);
            None
        }
    };
    let language = Language::detect(stored.as_deref(), locale);
    if stored.as_deref() != Some(language.code()) {
        if let Err(e) = save_language(store, language) {
            warn!("Failed to persist language setting: {}", e);
        }
    }
    language
}

pub fn save_language(store: &dyn KeyValueStore, language: Language) -> Result<(), StoreError> {
    store.set(LANGUAGE_KEY, language.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const YAML: &str = r#"
local:
  storage_dir: data/local
  autosave_ms: 500
production:
  storage_dir: /var/lib/folio
  typst_bin: /usr/local/bin/typst
  port: 9000
"#;

    #[test]
    fn test_defaults_without_file() {
        let base = Path::new("/srv/app");
        let config = BuilderConfig::from_sources(None, env_from(&[]), base).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/srv/app/.folio/storage"));
        assert_eq!(config.autosave_interval, Duration::from_secs(2));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_section_selected_by_environment() {
        let base = Path::new("/srv/app");
        let local = BuilderConfig::from_sources(Some(YAML), env_from(&[]), base).unwrap();
        assert_eq!(local.storage_dir, PathBuf::from("/srv/app/data/local"));
        assert_eq!(local.autosave_interval, Duration::from_millis(500));

        let prod =
            BuilderConfig::from_sources(Some(YAML), env_from(&[("FOLIO_ENV", "production")]), base)
                .unwrap();
        assert_eq!(prod.storage_dir, PathBuf::from("/var/lib/folio"));
        assert_eq!(prod.typst_bin, PathBuf::from("/usr/local/bin/typst"));
        assert_eq!(prod.port, 9000);
    }

    #[test]
    fn test_environment_overrides_file() {
        let env = env_from(&[
            ("FOLIO_STORAGE_DIR", "/tmp/folio"),
            ("FOLIO_AUTOSAVE_MS", "250"),
            ("LANG", "ja_JP.UTF-8"),
        ]);
        let config = BuilderConfig::from_sources(Some(YAML), env, Path::new("/")).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/folio"));
        assert_eq!(config.autosave_interval, Duration::from_millis(250));
        assert_eq!(config.locale.as_deref(), Some("ja_JP.UTF-8"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let base = Path::new("/");
        assert!(
            BuilderConfig::from_sources(None, env_from(&[("FOLIO_AUTOSAVE_MS", "soon")]), base)
                .is_err()
        );
        assert!(
            BuilderConfig::from_sources(None, env_from(&[("FOLIO_AUTOSAVE_MS", "0")]), base).is_err()
        );
        assert!(BuilderConfig::from_sources(Some("local:\n  colour: red\n"), env_from(&[]), base)
            .is_err());
    }

    #[test]
    fn test_language_is_detected_once_then_stored() {
        let store = MemoryStore::new();
        assert_eq!(load_language(&store, Some("ko_KR.UTF-8")), Language::Ko);
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("ko"));

        // stored value wins over a different locale later on
        assert_eq!(load_language(&store, Some("zh_CN")), Language::Ko);

        save_language(&store, Language::Ja).unwrap();
        assert_eq!(load_language(&store, None), Language::Ja);
    }
}
