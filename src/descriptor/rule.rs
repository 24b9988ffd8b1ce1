//! Transform rules and rule selection.
//!
//! # Selection
//!
//! Rules are evaluated in a stable order: higher `priority` first, then
//! declaration order. The first rule whose `test` matches and whose
//! `exclude` (if any) does not match is selected. No match means the
//! executor passes the resource through unmodified.
//!
//! With every priority left at the default `0`, evaluation order is exactly
//! declaration order.

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::step::TransformStep;
use crate::utils::path::to_slash;

// ============================================================================
// Pattern
// ============================================================================

/// A regular expression over a `/`-separated resource path.
///
/// Compared and serialized by its source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    pub const fn from_regex(regex: Regex) -> Self {
        Self(regex)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(D::Error::custom)
    }
}

// ============================================================================
// TransformRule
// ============================================================================

/// Match pattern, optional exclusion and the ordered steps to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    /// Display name (e.g. `script`, `stylesheet`).
    pub name: String,
    /// Resources whose path matches are candidates for this rule.
    pub test: Pattern,
    /// Candidates whose path also matches this are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Pattern>,
    /// Explicit precedence; higher is evaluated first.
    #[serde(default)]
    pub priority: i32,
    /// Steps in execution order; each consumes the previous one's output.
    pub steps: Vec<TransformStep>,
}

impl TransformRule {
    pub fn new(name: impl Into<String>, test: Pattern) -> Self {
        Self {
            name: name.into(),
            test,
            exclude: None,
            priority: 0,
            steps: Vec::new(),
        }
    }

    pub fn exclude(mut self, pattern: Pattern) -> Self {
        self.exclude = Some(pattern);
        self
    }

    #[cfg(test)]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn step(mut self, step: TransformStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Check whether this rule applies to a `/`-separated path.
    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(path))
    }

    /// Find a step by transform identifier.
    #[cfg(test)]
    pub fn find_step(&self, transform: &str) -> Option<&TransformStep> {
        self.steps.iter().find(|s| s.transform == transform)
    }
}

// ============================================================================
// RuleSet
// ============================================================================

/// Ordered rule list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<TransformRule>);

impl RuleSet {
    pub fn new(rules: Vec<TransformRule>) -> Self {
        Self(rules)
    }

    pub fn push(&mut self, rule: TransformRule) {
        self.0.push(rule);
    }

    /// Rules in declaration order.
    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, TransformRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&TransformRule> {
        self.0.iter().find(|r| r.name == name)
    }

    /// Rules in evaluation order (priority descending, stable).
    pub fn evaluation_order(&self) -> Vec<&TransformRule> {
        let mut ordered: Vec<_> = self.0.iter().collect();
        ordered.sort_by_key(|r| std::cmp::Reverse(r.priority));
        ordered
    }

    /// Select the rule for a resource, or `None` for pass-through.
    pub fn select(&self, path: &Path) -> Option<&TransformRule> {
        let path = to_slash(path);
        self.evaluation_order()
            .into_iter()
            .find(|rule| rule.matches(&path))
    }

    /// Every rule that would accept `path`, in evaluation order.
    ///
    /// More than one entry means the rule set overlaps for this resource.
    pub fn matching(&self, path: &Path) -> Vec<&TransformRule> {
        let path = to_slash(path);
        self.evaluation_order()
            .into_iter()
            .filter(|rule| rule.matches(&path))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a TransformRule;
    type IntoIter = std::slice::Iter<'a, TransformRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::step::transform;

    fn rule(name: &str, test: &str) -> TransformRule {
        TransformRule::new(name, Pattern::new(test).unwrap()).step(TransformStep::new(name))
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::new(vec![rule("a", r"\.png$"), rule("b", r"\.(png|jpg)$")]);
        assert_eq!(rules.select(Path::new("img/x.png")).unwrap().name, "a");
        assert_eq!(rules.select(Path::new("img/x.jpg")).unwrap().name, "b");
    }

    #[test]
    fn test_no_match_is_pass_through() {
        let rules = RuleSet::new(vec![rule("a", r"\.png$")]);
        assert!(rules.select(Path::new("data.json")).is_none());
    }

    #[test]
    fn test_exclude_skips_to_next_rule() {
        let rules = RuleSet::new(vec![
            rule("app", r"\.js$").exclude(Pattern::new("vendor").unwrap()),
            rule("vendor", r"\.js$"),
        ]);
        assert_eq!(rules.select(Path::new("src/main.js")).unwrap().name, "app");
        assert_eq!(rules.select(Path::new("vendor/lib.js")).unwrap().name, "vendor");
    }

    #[test]
    fn test_priority_beats_declaration_order() {
        let rules = RuleSet::new(vec![
            rule("generic", r"\.svg$"),
            rule("icons", r"^icons/.*\.svg$").priority(10),
        ]);
        assert_eq!(rules.select(Path::new("icons/menu.svg")).unwrap().name, "icons");
        assert_eq!(rules.select(Path::new("img/logo.svg")).unwrap().name, "generic");
    }

    #[test]
    fn test_equal_priority_keeps_declaration_order() {
        let rules = RuleSet::new(vec![rule("x", "a"), rule("y", "b"), rule("z", "c")]);
        let order = rules.evaluation_order();
        let names: Vec<_> = order.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[test]
    fn test_matching_reports_overlap() {
        let rules = RuleSet::new(vec![rule("a", r"\.svg$"), rule("b", r"\.(png|svg)$")]);
        assert_eq!(rules.matching(Path::new("a.svg")).len(), 2);
        assert_eq!(rules.matching(Path::new("a.png")).len(), 1);
    }

    #[test]
    fn test_find_step() {
        let rule = rule("file", r"\.ttf$");
        assert!(rule.find_step(transform::FILE).is_some());
        assert!(rule.find_step(transform::SASS).is_none());
    }

    #[test]
    fn test_pattern_serde() {
        let pattern = Pattern::new(r"\.scss$").unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, r#""\\.scss$""#);
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
        assert!(serde_json::from_str::<Pattern>(r#""(unclosed""#).is_err());
    }
}
