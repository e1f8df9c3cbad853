//! Shared configuration loader for mdeck.
//!
//! `defaults/mdeck.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdeckConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdeck_core::rules::DeckRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdeck.default.toml");

/// Top-level configuration consumed by mdeck.
#[derive(Debug, Clone, Deserialize)]
pub struct MdeckConfig {
    pub rules: RulesConfig,
    #[serde(default)]
    pub render: RenderConfig,
    pub watch: WatchSettings,
}

/// Mirrors the knobs exposed by the parser and layout selector.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub discard_prefixes: Vec<String>,
    pub alert_phrase: String,
    pub terminal_language: String,
    pub terminal_prompt: String,
    pub ranked_list_max_items: usize,
}

impl From<RulesConfig> for DeckRules {
    fn from(config: RulesConfig) -> Self {
        DeckRules {
            discard_prefixes: config.discard_prefixes,
            alert_phrase: config.alert_phrase,
            terminal_language: config.terminal_language,
            terminal_prompt: config.terminal_prompt,
            ranked_list_max_items: config.ranked_list_max_items,
        }
    }
}

impl From<&RulesConfig> for DeckRules {
    fn from(config: &RulesConfig) -> Self {
        DeckRules {
            discard_prefixes: config.discard_prefixes.clone(),
            alert_phrase: config.alert_phrase.clone(),
            terminal_language: config.terminal_language.clone(),
            terminal_prompt: config.terminal_prompt.clone(),
            ranked_list_max_items: config.ranked_list_max_items,
        }
    }
}

/// HTML output knobs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub title: Option<String>,
    /// Stylesheet file appended after the embedded CSS.
    #[serde(default)]
    pub custom_css: Option<PathBuf>,
}

/// Watch mode server and debounce settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSettings {
    pub host: String,
    pub port: u16,
    pub debounce_ms: u64,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdeckConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdeckConfig, ConfigError> {
    Loader::new().build()
}
