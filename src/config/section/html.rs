//! `[html]` section configuration.
//!
//! The `index` document is always generated. Every name in `pages` adds one
//! more document rendered from `views/<name>.pug` to `<name>.html`.
//!
//! # Example
//!
//! ```toml
//! [html]
//! pages = ["slide-1", "slide-2", "contact"]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Name of the document every pipeline generates.
pub const INDEX_PAGE: &str = "index";

/// Extra HTML documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub pages: Vec<String>,
}

impl HtmlConfig {
    pub const PAGES: FieldPath = FieldPath::new("html.pages");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();
        for page in &self.pages {
            if page.trim().is_empty() {
                diag.error(Self::PAGES, "page names must not be empty");
            } else if page.contains(['/', '\\']) {
                diag.error_with_hint(
                    Self::PAGES,
                    format!("`{page}` contains a path separator"),
                    "documents are emitted at the output root; use a plain name",
                );
            } else if page.ends_with(".html") || page.ends_with(".pug") {
                diag.error_with_hint(
                    Self::PAGES,
                    format!("`{page}` includes an extension"),
                    format!("use `{}`", page.rsplit_once('.').map_or(page.as_str(), |(s, _)| s)),
                );
            } else if page == INDEX_PAGE {
                diag.warn(
                    Self::PAGES,
                    format!("`{INDEX_PAGE}` is always generated and need not be listed"),
                );
            } else if !seen.insert(page.as_str()) {
                diag.warn(Self::PAGES, format!("`{page}` is listed twice, keeping one"));
            }
        }
    }

    /// Pages in declaration order, without `index` and without duplicates.
    pub fn unique_pages(&self) -> impl Iterator<Item = &str> {
        let mut seen = FxHashSet::default();
        seen.insert(INDEX_PAGE);
        self.pages
            .iter()
            .map(String::as_str)
            .filter(move |page| seen.insert(*page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_pages() {
        let config = test_parse_config("[html]\npages = [\"slide-1\", \"slide-2\"]");
        assert_eq!(config.html.pages, ["slide-1", "slide-2"]);
    }

    #[test]
    fn test_unique_pages_drops_index_and_duplicates() {
        let html = HtmlConfig {
            pages: vec!["a".into(), "index".into(), "b".into(), "a".into()],
        };
        assert_eq!(html.unique_pages().collect::<Vec<_>>(), ["a", "b"]);

        let mut diag = ConfigDiagnostics::new();
        html.validate(&mut diag);
        assert!(!diag.has_errors());
        let messages: Vec<_> = diag.warnings().iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(
            messages,
            [
                "`index` is always generated and need not be listed",
                "`a` is listed twice, keeping one",
            ]
        );
    }

    #[test]
    fn test_invalid_page_names() {
        let html = HtmlConfig {
            pages: vec![String::new(), "views/a".into(), "b.html".into()],
        };
        let mut diag = ConfigDiagnostics::new();
        html.validate(&mut diag);
        assert_eq!(diag.errors().len(), 3);
        assert_eq!(diag.errors()[2].hint.as_deref(), Some("use `b`"));
    }
}
