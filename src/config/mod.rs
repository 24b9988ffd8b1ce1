//! Pipeline configuration management for `webpipe.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [output] [serve] [notify] [html]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! The default `webpipe.toml` is optional: without one every field keeps its
//! default and the stock pipeline is produced unchanged. A file passed with
//! `-C` must exist.
//!
//! # Example
//!
//! ```toml
//! entries = ["js/main.js", "sass/app.scss"]
//!
//! [output]
//! dir = "dist"
//!
//! [html]
//! pages = ["slide-1"]
//!
//! # `test`/`exclude` are regexes over `/`-separated paths; `\d`, `\w`, `\s`
//! # and `(?i)` are available
//! [[rules]]
//! name = "video"
//! test = '\.(mp4|webm)$'
//! steps = [{ transform = "file", options = { name = "media/[name].[ext]" } }]
//! ```

pub mod section;
pub mod types;
mod util;

pub use section::{HtmlConfig, INDEX_PAGE, NotifyConfig, OutputConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, descriptor::TransformRule, log};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

/// Config file name searched for when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "webpipe.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing webpipe.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Entry resources, relative to the project root
    pub entries: Vec<PathBuf>,

    pub output: OutputConfig,
    pub serve: ServeConfig,
    pub notify: NotifyConfig,
    pub html: HtmlConfig,

    /// Extra transform rules, appended after the stock rules
    pub rules: Vec<TransformRule>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            root: PathBuf::new(),
            entries: vec!["js/main.js".into(), "sass/app.scss".into()],
            output: OutputConfig::default(),
            serve: ServeConfig::default(),
            notify: NotifyConfig::default(),
            html: HtmlConfig::default(),
            rules: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub const ENTRIES: FieldPath = FieldPath::new("entries");
    pub const RULES: FieldPath = FieldPath::new("rules");

    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file exists.
    ///
    /// Only the default `webpipe.toml` is optional; a file named with `-C`
    /// must exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        if cli.verbose {
            crate::logger::set_verbose(true);
        }
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None if cli.config.as_path() != Path::new(DEFAULT_CONFIG) => {
                let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found");
                return Err(ConfigError::Io(cli.config.clone(), err).into());
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Apply CLI overrides on top of the file.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.output.dir, cli.output.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate every section, printing warnings and failing on errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} must list at least one resource",
                Self::ENTRIES
            )));
        }

        let mut diag = ConfigDiagnostics::new();
        self.output.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.html.validate(&mut diag);
        self.validate_rules(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    fn validate_rules(&self, diag: &mut ConfigDiagnostics) {
        let mut names: FxHashSet<&str> = crate::descriptor::STOCK_RULES.iter().copied().collect();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                diag.error(Self::RULES, format!("rule `{}` has an empty name", rule.test));
                continue;
            }
            if rule.steps.is_empty() {
                diag.error_with_hint(
                    Self::RULES,
                    format!("rule `{}` has no steps", rule.name),
                    "omit the rule to pass matching resources through",
                );
            }
            if !names.insert(rule.name.as_str()) {
                diag.warn(Self::RULES, format!("rule name `{}` is used more than once", rule.name));
            }
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

/// Parse config and panic on unknown fields (catches typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PipelineConfig {
    let (parsed, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
