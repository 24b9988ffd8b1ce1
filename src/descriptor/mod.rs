//! Asset pipeline descriptor.
//!
//! One typed object declaring everything an external build executor needs:
//!
//! | Part        | Type               | Consumed                               |
//! |-------------|--------------------|----------------------------------------|
//! | entries     | [`EntrySet`]       | once, to seed the dependency graph     |
//! | rules       | [`RuleSet`]        | per reached resource, first match wins |
//! | plugins     | [`BuildPlugin`]    | per lifecycle hook, in declared order  |
//! | documents   | [`HtmlDocument`]   | through their `html` plugins           |
//! | output      | [`OutputDescriptor`] | when naming emitted files            |
//!
//! Construction is pure: [`PipelineDescriptor::new`] reads only its
//! arguments, so equal inputs always produce equal descriptors. Nothing here
//! validates patterns or checks that templates exist; that is the
//! executor's job.

mod entry;
mod html;
mod output;
mod plan;
mod plugin;
mod rule;
mod stock;
pub mod step;

pub use entry::EntrySet;
pub use html::HtmlDocument;
pub use output::{
    AssetClass, DEFAULT_HASH_LENGTH, FilenameTemplate, Filenames, HashPolicy, OutputDescriptor,
};
pub use plan::BuildPlan;
pub use plugin::{BuildPlugin, Hook};
pub use rule::{RuleSet, TransformRule};
pub use stock::STOCK_RULES;

use std::path::Path;

use serde::{Serialize, Serializer};

use crate::config::{INDEX_PAGE, PipelineConfig};
use crate::core::{BuildMode, Environment};

/// Source map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
    /// Source maps embedded as data URLs in the bundles.
    InlineSourceMap,
}

/// Dev server settings forwarded to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevServer {
    pub hot: bool,
    pub content_base: String,
}

/// Bundle size warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub hints: bool,
}

/// The complete pipeline configuration for one build invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineDescriptor {
    #[serde(serialize_with = "serialize_mode")]
    pub mode: BuildMode,
    pub entry: EntrySet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,
    pub rules: RuleSet,
    pub plugins: Vec<BuildPlugin>,
    pub documents: Vec<HtmlDocument>,
    pub output: OutputDescriptor,
    pub dev_server: DevServer,
    pub performance: Performance,
}

fn serialize_mode<S: Serializer>(mode: &BuildMode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.name())
}

impl PipelineDescriptor {
    /// Build the descriptor for `mode`.
    ///
    /// Entry and output paths are anchored at `env.root()`.
    pub fn new(mode: BuildMode, env: &Environment, config: &PipelineConfig) -> Self {
        let entry = entry_set(env, &config.entries);

        let output = &config.output;
        let output = OutputDescriptor {
            path: env.root_join(&output.dir),
            filenames: Filenames {
                script: FilenameTemplate::new(output.script.as_str()),
                stylesheet: FilenameTemplate::new(output.stylesheet.as_str()),
                font: FilenameTemplate::new(output.font.as_str()),
                image: FilenameTemplate::new(output.image.as_str()),
                document: FilenameTemplate::new("[name].html"),
            },
            hash: output.hash,
            hash_length: output.hash_length,
        };

        let mut descriptor = Self {
            mode,
            entry,
            devtool: mode.source_maps.then_some(Devtool::InlineSourceMap),
            rules: stock::rules(mode, config),
            plugins: stock::plugins(config),
            documents: Vec::new(),
            output,
            dev_server: DevServer {
                hot: config.serve.hot,
                content_base: config.serve.content_base.clone(),
            },
            performance: Performance { hints: false },
        };

        for name in std::iter::once(INDEX_PAGE).chain(config.html.unique_pages()) {
            descriptor.add_document(name);
        }
        descriptor
    }

    /// Build the descriptor with the mode selected by `NODE_ENV`.
    pub fn from_env(env: &Environment, config: &PipelineConfig) -> Self {
        Self::new(BuildMode::from_env(env), env, config)
    }

    /// Add one generated HTML document and the `html` plugin that emits it.
    ///
    /// Every document, `index` and `[html] pages` included, goes through here.
    pub fn add_document(&mut self, name: &str) -> &HtmlDocument {
        let document = HtmlDocument::named(name);
        self.plugins.push(document.to_plugin());
        self.documents.push(document);
        &self.documents[self.documents.len() - 1]
    }

    /// Rule selected for a resource, or `None` for pass-through.
    pub fn rule_for(&self, path: &Path) -> Option<&TransformRule> {
        self.rules.select(path)
    }

    /// Plugins attached to `hook`, in declared order.
    pub fn plugins_for(&self, hook: Hook) -> impl Iterator<Item = &BuildPlugin> {
        self.plugins.iter().filter(move |p| p.hook == hook)
    }

    /// Dry-run plan for a set of resources.
    pub fn plan<P: AsRef<Path>>(&self, resources: &[P]) -> BuildPlan<'_> {
        BuildPlan::new(self, resources)
    }
}

/// Config entries are non-empty after validation; an empty list falls back
/// to the stock script entry so the set invariant still holds.
fn entry_set(env: &Environment, entries: &[std::path::PathBuf]) -> EntrySet {
    let mut iter = entries.iter().map(|p| env.root_join(p));
    let first = iter
        .next()
        .unwrap_or_else(|| env.root_join("js/main.js"));
    iter.fold(EntrySet::new(first), |set, entry| set.with(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::plugin::plugin_id;
    use super::rule::Pattern;
    use super::step::TransformStep;
    use crate::core::MODE_VAR;
    use serde_json::json;
    use std::path::PathBuf;

    fn env(mode: Option<&str>) -> Environment {
        Environment::from_vars(
            PathBuf::from("/project"),
            mode.map(|m| (MODE_VAR.to_string(), m.to_string())),
        )
    }

    fn build(mode: Option<&str>) -> PipelineDescriptor {
        PipelineDescriptor::from_env(&env(mode), &PipelineConfig::default())
    }

    fn image_enabled(d: &PipelineDescriptor) -> Option<&serde_json::Value> {
        d.rule_for(Path::new("img/photo.png"))
            .and_then(|r| r.find_step(step::transform::IMAGE_OPTIMIZE))
            .and_then(|s| s.get("enabled"))
    }

    #[test]
    fn test_production_policy() {
        let d = build(Some("production"));
        assert_eq!(d.devtool, None);
        assert_eq!(image_enabled(&d), Some(&json!(true)));
        let css = d.rules.get("stylesheet").unwrap().find_step(step::transform::CSS).unwrap();
        assert_eq!(css.get("sourceMap"), Some(&json!(false)));
    }

    #[test]
    fn test_development_policy() {
        for d in [build(None), build(Some("development"))] {
            assert_eq!(d.devtool, Some(Devtool::InlineSourceMap));
            assert_eq!(image_enabled(&d), Some(&json!(false)));
            let sass = d.rules.get("stylesheet").unwrap().find_step(step::transform::SASS).unwrap();
            assert_eq!(sass.get("sourceMap"), Some(&json!(true)));
        }
    }

    #[test]
    fn test_each_class_selects_exactly_one_rule() {
        let d = build(None);
        let samples = [
            ("js/main.js", "script"),
            ("sass/app.scss", "stylesheet"),
            ("fonts/Inter.woff2", "font"),
            ("img/logo.PNG", "image"),
            ("img/photo.jpeg", "image"),
            ("views/index.pug", "template"),
        ];
        for (path, expected) in samples {
            let matching = d.rules.matching(Path::new(path));
            assert_eq!(matching.len(), 1, "{path}");
            let rule = d.rule_for(Path::new(path)).unwrap();
            assert_eq!(rule.name, expected, "{path}");
            assert!(!rule.steps.is_empty(), "{path}");
        }
    }

    #[test]
    fn test_vendor_scripts_pass_through() {
        let d = build(None);
        assert!(d.rule_for(Path::new("node_modules/lodash/lodash.js")).is_none());
        assert!(d.rule_for(Path::new("bower_components/jq/jq.js")).is_none());
        assert!(d.rule_for(Path::new("data/feed.json")).is_none());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build(Some("production")), build(Some("production")));
        assert_eq!(build(None), build(None));
        assert_ne!(build(None), build(Some("production")));
    }

    #[test]
    fn test_entries_and_output_anchored_at_root() {
        let d = build(None);
        let entries: Vec<_> = d.entry.iter().collect();
        assert_eq!(
            entries,
            [Path::new("/project/js/main.js"), Path::new("/project/sass/app.scss")]
        );
        assert_eq!(d.output.path, PathBuf::from("/project/dist"));
    }

    #[test]
    fn test_stylesheet_output_is_content_hashed() {
        let d = build(None);
        let name = d.output.filename_for(AssetClass::Stylesheet, Path::new("sass/app.scss"), b"a{}");
        assert!(name.starts_with("css/app."));
        assert_eq!(name.len(), "css/app..css".len() + DEFAULT_HASH_LENGTH);
        let script = d.output.filename_for(AssetClass::Script, Path::new("js/main.js"), b"x");
        assert_eq!(script, "js/main.js");
    }

    #[test]
    fn test_documents_from_config_and_helper() {
        let mut config = PipelineConfig::default();
        config.html.pages = vec!["slide-1".into(), "index".into()];
        let mut d = PipelineDescriptor::new(BuildMode::DEVELOPMENT, &env(None), &config);

        let names: Vec<_> = d.documents.iter().map(HtmlDocument::name).collect();
        assert_eq!(names, ["index", "slide-1"]);

        let added = d.add_document("slide-2");
        assert_eq!(added.filename, "slide-2.html");
        let html_plugins = d.plugins.iter().filter(|p| p.id == plugin_id::HTML).count();
        assert_eq!(html_plugins, 3);
        assert_eq!(d.plugins.last().unwrap().get("filename"), Some(&json!("slide-2.html")));
    }

    #[test]
    fn test_plugins_for_hook_keep_order() {
        let d = build(None);
        let ids: Vec<_> = d.plugins_for(Hook::BeforeBuild).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, [plugin_id::CLEAN, plugin_id::NO_EMIT_ON_ERRORS]);
    }

    #[test]
    fn test_extra_rule_with_priority_shadows_image_rule() {
        let mut config = PipelineConfig::default();
        config.rules.push(
            TransformRule::new("icons", Pattern::new(r"^icons/.*\.svg$").unwrap())
                .priority(1)
                .step(TransformStep::new("svg-sprite")),
        );
        let d = PipelineDescriptor::new(BuildMode::PRODUCTION, &env(None), &config);
        assert_eq!(d.rule_for(Path::new("icons/menu.svg")).unwrap().name, "icons");
        assert_eq!(d.rule_for(Path::new("img/menu.svg")).unwrap().name, "image");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(build(Some("production"))).unwrap();
        assert_eq!(json["mode"], "production");
        assert!(json.get("devtool").is_none());
        assert_eq!(json["performance"], json!({ "hints": false }));
        assert_eq!(json["rules"][0]["test"], r"\.js?$");
        assert_eq!(json["rules"][0]["exclude"], "(node_modules|bower_components)");
        assert_eq!(json["entry"].as_array().unwrap().len(), 2);

        let json = serde_json::to_value(build(None)).unwrap();
        assert_eq!(json["devtool"], "inline-source-map");
    }
}
