//! HTML document entries.
//!
//! Each entry asks the executor to render one template into one HTML file
//! with the built bundles injected. [`HtmlDocument::named`] is the single
//! place that maps a document name to its template and output filename, so
//! extra documents never duplicate plugin wiring.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::plugin::{BuildPlugin, Hook, plugin_id};

/// Directory holding document templates, relative to the project root.
pub const TEMPLATE_DIR: &str = "views";

/// Template file extension.
pub const TEMPLATE_EXT: &str = "pug";

/// Where generated `<script>`/`<link>` tags are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inject {
    Head,
    #[default]
    Body,
}

impl Inject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
        }
    }
}

/// One generated HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlDocument {
    /// Template resource, relative to the project root.
    pub template: PathBuf,
    pub inject: Inject,
    /// Emit a mobile viewport meta tag.
    pub mobile: bool,
    /// Output filename at the output root.
    pub filename: String,
}

impl HtmlDocument {
    /// Document entry for template `views/<name>.pug` written to `<name>.html`.
    pub fn named(name: &str) -> Self {
        Self {
            template: PathBuf::from(TEMPLATE_DIR).join(format!("{name}.{TEMPLATE_EXT}")),
            inject: Inject::Body,
            mobile: true,
            filename: format!("{name}.html"),
        }
    }

    /// Document name (output filename without `.html`).
    #[cfg(test)]
    pub fn name(&self) -> &str {
        self.filename.strip_suffix(".html").unwrap_or(&self.filename)
    }

    /// The `html` build plugin emitting this document.
    pub fn to_plugin(&self) -> BuildPlugin {
        BuildPlugin::new(plugin_id::HTML, Hook::AfterEmit)
            .option("template", self.template.to_string_lossy().into_owned())
            .option("inject", self.inject.as_str())
            .option("mobile", self.mobile)
            .option("filename", self.filename.as_str())
    }
}
