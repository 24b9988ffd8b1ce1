//! Output location and naming strategy.
//!
//! Filename templates understand four placeholders:
//!
//! | Placeholder        | Rendered as                                   |
//! |--------------------|-----------------------------------------------|
//! | `[name]`           | file stem of the source resource              |
//! | `[ext]`            | extension of the source resource (no dot)     |
//! | `[contenthash]`    | blake3 hex prefix of `hash_length` characters |
//! | `[contenthash:N]`  | blake3 hex prefix of `N` characters           |
//!
//! Anything else in brackets is copied verbatim.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::{hash, path::stem_and_ext};

/// Default length of `[contenthash]`.
pub const DEFAULT_HASH_LENGTH: usize = 20;

/// Output category with its own filename template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Script,
    Stylesheet,
    Font,
    Image,
    Document,
}

impl AssetClass {
    pub const ALL: [Self; 5] = [
        Self::Script,
        Self::Stylesheet,
        Self::Font,
        Self::Image,
        Self::Document,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Font => "font",
            Self::Image => "image",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| format!("unknown asset class `{s}`"))
    }
}

/// Whether filenames embed a content hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPolicy {
    /// `[contenthash]` renders the digest prefix.
    #[default]
    Hashed,
    /// `[contenthash]` renders empty; names stay stable across builds.
    Fixed,
}

// ============================================================================
// FilenameTemplate
// ============================================================================

/// Output filename pattern relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Whether rendering depends on file content.
    pub fn is_hashed(&self) -> bool {
        self.0.contains("[contenthash")
    }

    /// Render for a source resource and its content.
    pub fn render(
        &self,
        source: &Path,
        content: &[u8],
        policy: HashPolicy,
        hash_length: usize,
    ) -> String {
        let (name, ext) = stem_and_ext(source);
        self.expand(hash_length, |placeholder, out, rest| match placeholder {
            Placeholder::Name => out.push_str(&name),
            Placeholder::Ext => out.push_str(&ext),
            Placeholder::ContentHash(len) => match policy {
                HashPolicy::Hashed => out.push_str(&hash::fingerprint(content, len)),
                HashPolicy::Fixed => drop_hash_separator(out, rest),
            },
            Placeholder::Literal(text) => out.push_str(text),
        })
    }

    /// Template with the hash policy baked in, for collaborators that do
    /// their own `[name]`/`[ext]` substitution.
    ///
    /// `Hashed` pins every `[contenthash]` to an explicit length; `Fixed`
    /// removes the placeholder the same way [`render`](Self::render) does.
    pub fn with_policy(&self, policy: HashPolicy, hash_length: usize) -> Self {
        Self(self.expand(hash_length, |placeholder, out, rest| match placeholder {
            Placeholder::Name => out.push_str("[name]"),
            Placeholder::Ext => out.push_str("[ext]"),
            Placeholder::ContentHash(len) => match policy {
                HashPolicy::Hashed => out.push_str(&format!("[contenthash:{len}]")),
                HashPolicy::Fixed => drop_hash_separator(out, rest),
            },
            Placeholder::Literal(text) => out.push_str(text),
        }))
    }

    /// Walk the template, handing each bracketed placeholder to `emit`
    /// together with the output so far and the unread remainder.
    fn expand<F>(&self, hash_length: usize, mut emit: F) -> String
    where
        F: FnMut(Placeholder<'_>, &mut String, &mut &str),
    {
        let mut out = String::with_capacity(self.0.len() + hash_length);
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find(']') else {
                out.push_str(after);
                rest = "";
                break;
            };
            let token = &after[1..close];
            rest = &after[close + 1..];
            let placeholder = match token {
                "name" => Placeholder::Name,
                "ext" => Placeholder::Ext,
                _ => match parse_hash_token(token, hash_length) {
                    Some(len) => Placeholder::ContentHash(len),
                    None => Placeholder::Literal(&after[..=close]),
                },
            };
            emit(placeholder, &mut out, &mut rest);
        }

        out.push_str(rest);
        out
    }
}

enum Placeholder<'t> {
    Name,
    Ext,
    ContentHash(usize),
    /// Unknown placeholder, copied verbatim with its brackets.
    Literal(&'t str),
}

/// Remove the separator an empty hash would leave behind.
///
/// `app.[contenthash].css` -> `app.css`, `app-[contenthash].css` -> `app.css`,
/// `[contenthash].app.css` -> `app.css`.
fn drop_hash_separator(out: &mut String, rest: &mut &str) {
    const SEPARATORS: [char; 3] = ['.', '-', '_'];
    if out.ends_with(SEPARATORS) {
        out.pop();
    } else if (out.is_empty() || out.ends_with('/'))
        && let Some(stripped) = rest.strip_prefix(SEPARATORS)
    {
        *rest = stripped;
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// OutputDescriptor
// ============================================================================

/// Filename template per asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filenames {
    pub script: FilenameTemplate,
    pub stylesheet: FilenameTemplate,
    pub font: FilenameTemplate,
    pub image: FilenameTemplate,
    pub document: FilenameTemplate,
}

impl Filenames {
    pub fn get(&self, class: AssetClass) -> &FilenameTemplate {
        match class {
            AssetClass::Script => &self.script,
            AssetClass::Stylesheet => &self.stylesheet,
            AssetClass::Font => &self.font,
            AssetClass::Image => &self.image,
            AssetClass::Document => &self.document,
        }
    }
}

/// Where and under which names the executor writes output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// Absolute output directory.
    pub path: PathBuf,
    pub filenames: Filenames,
    pub hash: HashPolicy,
    pub hash_length: usize,
}

impl OutputDescriptor {
    /// Filename (relative to `path`) for a resource of `class`.
    pub fn filename_for(&self, class: AssetClass, source: &Path, content: &[u8]) -> String {
        self.filenames
            .get(class)
            .render(source, content, self.hash, self.hash_length)
    }
}
