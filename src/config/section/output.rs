//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! dir = "dist"
//! script = "js/main.js"
//! stylesheet = "css/[name].[contenthash].css"
//! font = "fonts/[name].[ext]"
//! image = "img/[name].[ext]"
//! hash = "hashed"       # or "fixed" to keep names stable
//! hash_length = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::descriptor::{DEFAULT_HASH_LENGTH, HashPolicy};

/// Output directory and per-class filename templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (relative to project root).
    pub dir: PathBuf,
    pub script: String,
    pub stylesheet: String,
    pub font: String,
    pub image: String,
    pub hash: HashPolicy,
    /// Length of `[contenthash]` in hex characters.
    pub hash_length: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "dist".into(),
            script: "js/main.js".into(),
            stylesheet: "css/[name].[contenthash].css".into(),
            font: "fonts/[name].[ext]".into(),
            image: "img/[name].[ext]".into(),
            hash: HashPolicy::Hashed,
            hash_length: DEFAULT_HASH_LENGTH,
        }
    }
}

impl OutputConfig {
    pub const DIR: FieldPath = FieldPath::new("output.dir");
    pub const HASH_LENGTH: FieldPath = FieldPath::new("output.hash_length");
    const TEMPLATES: [FieldPath; 4] = [
        FieldPath::new("output.script"),
        FieldPath::new("output.stylesheet"),
        FieldPath::new("output.font"),
        FieldPath::new("output.image"),
    ];

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.as_os_str().is_empty() {
            diag.error(Self::DIR, "output directory must not be empty");
        }

        if !(1..=64).contains(&self.hash_length) {
            diag.error_with_hint(
                Self::HASH_LENGTH,
                format!("{} is out of range", self.hash_length),
                "blake3 digests have 64 hex characters; use 1..=64",
            );
        }

        let templates = [&self.script, &self.stylesheet, &self.font, &self.image];
        for (field, template) in Self::TEMPLATES.into_iter().zip(templates) {
            if template.trim().is_empty() {
                diag.error(field, "filename template must not be empty");
            } else if template.starts_with('/') {
                diag.error_with_hint(
                    field,
                    format!("`{template}` is absolute"),
                    "templates are relative to output.dir",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::descriptor::HashPolicy;

    #[test]
    fn test_output_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.output.dir, std::path::PathBuf::from("dist"));
        assert_eq!(config.output.script, "js/main.js");
        assert_eq!(config.output.stylesheet, "css/[name].[contenthash].css");
        assert_eq!(config.output.hash, HashPolicy::Hashed);
        assert_eq!(config.output.hash_length, 20);
    }

    #[test]
    fn test_output_overrides() {
        let config = test_parse_config(
            r#"
[output]
dir = "public"
hash = "fixed"
hash_length = 8
"#,
        );
        assert_eq!(config.output.dir, std::path::PathBuf::from("public"));
        assert_eq!(config.output.hash, HashPolicy::Fixed);
        assert_eq!(config.output.hash_length, 8);
        // untouched fields keep defaults
        assert_eq!(config.output.font, "fonts/[name].[ext]");
    }

    #[test]
    fn test_output_validation() {
        let config = test_parse_config("[output]\nhash_length = 0\nimage = \"/img/[name]\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.output.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["output.hash_length", "output.image"]);
    }
}
