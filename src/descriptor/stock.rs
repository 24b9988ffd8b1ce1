//! The stock rule and plugin lists.
//!
//! Option keys follow the naming of the collaborators that consume them
//! (`sourceMap`, `publicPath`, ...) since the executor forwards them as-is.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::output::FilenameTemplate;
use super::plugin::{BuildPlugin, Hook, plugin_id};
use super::rule::{Pattern, RuleSet, TransformRule};
use super::step::{TransformStep, transform};
use crate::config::PipelineConfig;
use crate::core::BuildMode;

/// Stock rule names in declaration order.
pub const STOCK_RULES: [&str; 5] = ["script", "stylesheet", "font", "template", "image"];

static SCRIPT_TEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.js?$").unwrap());
static SCRIPT_EXCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(node_modules|bower_components)").unwrap());
static STYLESHEET_TEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.scss$").unwrap());
static FONT_TEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(eot|ttf|woff|woff2|otf)$").unwrap());
static TEMPLATE_TEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.pug$").unwrap());
static IMAGE_TEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|svg)$").unwrap());

fn pattern(regex: &LazyLock<Regex>) -> Pattern {
    Pattern::from_regex(Regex::clone(regex))
}

/// Output template with `[output] hash` and `hash_length` applied, for
/// options the executor hands to collaborators verbatim.
fn output_name(config: &PipelineConfig, template: &str) -> String {
    FilenameTemplate::new(template)
        .with_policy(config.output.hash, config.output.hash_length)
        .to_string()
}

/// Stock rules followed by the configured extra rules.
pub fn rules(mode: BuildMode, config: &PipelineConfig) -> RuleSet {
    let [script, stylesheet, font, template, image] = STOCK_RULES;
    let mut rules = RuleSet::new(vec![
        TransformRule::new(script, pattern(&SCRIPT_TEST))
            .exclude(pattern(&SCRIPT_EXCLUDE))
            .step(TransformStep::new(transform::BABEL).option("presets", json!(["@babel/preset-env"]))),
        // Extraction is declared first; the compile steps feed it
        TransformRule::new(stylesheet, pattern(&STYLESHEET_TEST))
            .step(TransformStep::new(transform::EXTRACT_CSS).option("publicPath", "../"))
            .step(
                TransformStep::new(transform::CSS)
                    .option("sourceMap", mode.source_maps)
                    .option("url", true),
            )
            .step(TransformStep::new(transform::SASS).option("sourceMap", mode.source_maps)),
        TransformRule::new(font, pattern(&FONT_TEST))
            .step(TransformStep::new(transform::FILE).option("name", output_name(config, &config.output.font))),
        TransformRule::new(template, pattern(&TEMPLATE_TEST)).step(TransformStep::new(transform::PUG)),
        TransformRule::new(image, pattern(&IMAGE_TEST))
            .step(TransformStep::new(transform::FILE).option("name", output_name(config, &config.output.image)))
            .step(image_optimize(mode)),
    ]);

    for rule in &config.rules {
        rules.push(rule.clone());
    }
    rules
}

/// Image optimization step; a pass-through unless the mode optimizes images.
fn image_optimize(mode: BuildMode) -> TransformStep {
    TransformStep::new(transform::IMAGE_OPTIMIZE)
        .option("enabled", mode.optimize_images)
        .option("gifsicle", json!({ "interlaced": false }))
        .option("mozjpeg", json!({ "progressive": true, "arithmetic": false }))
        .option("optipng", false)
        .option("pngquant", json!({ "floyd": 0.5, "speed": 2 }))
        .option(
            "svgo",
            json!({ "plugins": [{ "removeTitle": true }, { "convertPathData": false }] }),
        )
}

/// Stock plugins; `html` plugins are appended per document by the caller.
pub fn plugins(config: &PipelineConfig) -> Vec<BuildPlugin> {
    let serve = &config.serve;
    let mut plugins = vec![
        BuildPlugin::new(plugin_id::CLEAN, Hook::BeforeBuild),
        BuildPlugin::new(plugin_id::BROWSER_SYNC, Hook::DevServerStart)
            .option("host", serve.host.as_str())
            .option("port", serve.port)
            .option("proxy", serve.proxy.as_str()),
        BuildPlugin::new(plugin_id::EXTRACT_CSS, Hook::AfterEmit)
            .option("filename", output_name(config, &config.output.stylesheet)),
        BuildPlugin::new(plugin_id::NO_EMIT_ON_ERRORS, Hook::BeforeBuild),
    ];

    if serve.hot {
        plugins.push(BuildPlugin::new(plugin_id::HOT_MODULE_REPLACEMENT, Hook::DevServerStart));
    }

    plugins.push(
        BuildPlugin::new(plugin_id::BUILD_NOTIFIER, Hook::AfterEmit)
            .option("title", config.notify.title.as_str())
            .option("suppressSuccess", config.notify.suppress_success),
    );

    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Environment;
    use crate::descriptor::{AssetClass, HashPolicy, PipelineDescriptor};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_stock_rule_order() {
        let rules = rules(BuildMode::DEVELOPMENT, &PipelineConfig::default());
        let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, STOCK_RULES);
    }

    #[test]
    fn test_stylesheet_steps_in_declared_order() {
        let rules = rules(BuildMode::DEVELOPMENT, &PipelineConfig::default());
        let steps: Vec<_> = rules
            .get("stylesheet")
            .unwrap()
            .steps
            .iter()
            .map(|s| s.transform.as_str())
            .collect();
        assert_eq!(steps, [transform::EXTRACT_CSS, transform::CSS, transform::SASS]);
    }

    #[test]
    fn test_file_names_follow_output_templates() {
        let mut config = PipelineConfig::default();
        config.output.font = "static/fonts/[name].[ext]".into();
        let rules = rules(BuildMode::PRODUCTION, &config);
        let step = rules.get("font").unwrap().find_step(transform::FILE).unwrap();
        assert_eq!(step.get("name"), Some(&json!("static/fonts/[name].[ext]")));
    }

    #[test]
    fn test_hot_flag_controls_hmr_plugin() {
        let mut config = PipelineConfig::default();
        let has_hmr = |plugins: &[BuildPlugin]| {
            plugins.iter().any(|p| p.id == plugin_id::HOT_MODULE_REPLACEMENT)
        };
        assert!(has_hmr(&plugins(&config)));
        config.serve.hot = false;
        assert!(!has_hmr(&plugins(&config)));
    }

    #[test]
    fn test_stock_plugin_order() {
        let ids: Vec<_> = plugins(&PipelineConfig::default())
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            ids,
            [
                plugin_id::CLEAN,
                plugin_id::BROWSER_SYNC,
                plugin_id::EXTRACT_CSS,
                plugin_id::NO_EMIT_ON_ERRORS,
                plugin_id::HOT_MODULE_REPLACEMENT,
                plugin_id::BUILD_NOTIFIER,
            ]
        );
    }

    fn extract_css_filename(config: &PipelineConfig) -> serde_json::Value {
        let plugins = plugins(config);
        let plugin = plugins.iter().find(|p| p.id == plugin_id::EXTRACT_CSS).unwrap();
        plugin.get("filename").unwrap().clone()
    }

    #[test]
    fn test_extract_css_filename_follows_hash_policy() {
        let mut config = PipelineConfig::default();
        assert_eq!(
            extract_css_filename(&config),
            json!("css/[name].[contenthash:20].css")
        );

        config.output.hash_length = 8;
        assert_eq!(
            extract_css_filename(&config),
            json!("css/[name].[contenthash:8].css")
        );

        config.output.hash = HashPolicy::Fixed;
        assert_eq!(extract_css_filename(&config), json!("css/[name].css"));
    }

    #[test]
    fn test_extract_css_agrees_with_output_naming() {
        let mut config = PipelineConfig::default();
        config.output.hash = HashPolicy::Fixed;
        let env = Environment::from_vars(PathBuf::from("/p"), Vec::new());
        let d = PipelineDescriptor::new(BuildMode::PRODUCTION, &env, &config);

        let named = d.output.filename_for(AssetClass::Stylesheet, Path::new("sass/app.scss"), b"a{}");
        let template = extract_css_filename(&config);
        assert_eq!(named, "css/app.css");
        assert_eq!(template.as_str().unwrap().replace("[name]", "app"), named);
    }
}
