//! Immutable snapshot of the process environment.
//!
//! The descriptor factory is pure: it never calls `std::env` itself. The
//! snapshot is captured once in `main` and passed down, which also lets
//! tests build descriptors for any environment without touching globals.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Environment variables plus the project root they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    root: PathBuf,
    vars: FxHashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Variables with non-UTF-8 names or values are skipped.
    pub fn capture(root: PathBuf) -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(root, vars)
    }

    pub fn from_vars(root: PathBuf, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            root,
            vars: vars.into_iter().collect(),
        }
    }

    /// Look up a variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Project root that entry and output paths are anchored to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the project root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Override a single variable (CLI `--mode` goes through here).
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}
