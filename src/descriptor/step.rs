//! Transform steps: one named content conversion plus its options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed option map; insertion order is preserved.
pub type Options = Map<String, Value>;

/// Identifiers of the stock transforms.
///
/// These are opaque to the descriptor: the executor maps each one to a
/// collaborator (transpiler, style compiler, file copier, ...).
pub mod transform {
    pub const BABEL: &str = "babel";
    pub const EXTRACT_CSS: &str = "extract-css";
    pub const CSS: &str = "css";
    pub const SASS: &str = "sass";
    pub const FILE: &str = "file";
    pub const PUG: &str = "pug";
    pub const IMAGE_OPTIMIZE: &str = "image-optimize";
}

/// A single transform applied to a matched resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// Transform identifier.
    pub transform: String,
    /// Transform-specific options.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Options,
}

impl TransformStep {
    pub fn new(transform: impl Into<String>) -> Self {
        Self {
            transform: transform.into(),
            options: Options::new(),
        }
    }

    /// Builder-style option setter.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_keep_insertion_order() {
        let step = TransformStep::new(transform::CSS)
            .option("sourceMap", true)
            .option("url", true)
            .option("importLoaders", 1);
        let keys: Vec<_> = step.options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["sourceMap", "url", "importLoaders"]);
    }

    #[test]
    fn test_serialize_skips_empty_options() {
        let json = serde_json::to_value(TransformStep::new(transform::PUG)).unwrap();
        assert_eq!(json, json!({ "transform": "pug" }));
    }

    #[test]
    fn test_deserialize_without_options() {
        let step: TransformStep = serde_json::from_value(json!({ "transform": "file" })).unwrap();
        assert_eq!(step, TransformStep::new(transform::FILE));
    }
}
