//! Whole-build plugins and the lifecycle hooks they attach to.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::step::Options;

/// Identifiers of the stock plugins.
pub mod plugin_id {
    pub const CLEAN: &str = "clean";
    pub const BROWSER_SYNC: &str = "browser-sync";
    pub const EXTRACT_CSS: &str = "extract-css";
    pub const NO_EMIT_ON_ERRORS: &str = "no-emit-on-errors";
    pub const HOT_MODULE_REPLACEMENT: &str = "hot-module-replacement";
    pub const BUILD_NOTIFIER: &str = "build-notifier";
    pub const HTML: &str = "html";
}

/// Lifecycle point at which the executor invokes a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    /// Before any resource is transformed.
    BeforeBuild,
    /// After output files are written.
    AfterEmit,
    /// When the development server starts.
    DevServerStart,
}

impl Hook {
    /// All hooks in the order the executor reaches them.
    pub const ALL: [Self; 3] = [Self::BeforeBuild, Self::AfterEmit, Self::DevServerStart];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeBuild => "before-build",
            Self::AfterEmit => "after-emit",
            Self::DevServerStart => "dev-server-start",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A side-effecting, whole-build extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlugin {
    pub id: String,
    pub hook: Hook,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: Options,
}

impl BuildPlugin {
    pub fn new(id: impl Into<String>, hook: Hook) -> Self {
        Self {
            id: id.into(),
            hook,
            options: Options::new(),
        }
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}
