//! Dry-run build plan.
//!
//! Mirrors the executor's control flow without touching the filesystem:
//! every resource is matched against the rule set (in input order), then
//! plugins are listed per lifecycle hook (in declared order).

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::PipelineDescriptor;
use super::plugin::{BuildPlugin, Hook};
use super::step::TransformStep;

/// What the executor does with one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action<'a> {
    /// Apply `steps` in order.
    Transform {
        rule: &'a str,
        steps: &'a [TransformStep],
        /// Other rules that also match and lost on precedence.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        shadowed: Vec<&'a str>,
    },
    /// No rule matched; the resource is copied through unmodified.
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedResource<'a> {
    pub path: PathBuf,
    #[serde(flatten)]
    pub action: Action<'a>,
}

/// Plugins run at one lifecycle hook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase<'a> {
    pub hook: Hook,
    pub plugins: Vec<&'a BuildPlugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlan<'a> {
    pub resources: Vec<PlannedResource<'a>>,
    pub phases: Vec<Phase<'a>>,
}

impl<'a> BuildPlan<'a> {
    pub fn new<P: AsRef<Path>>(descriptor: &'a PipelineDescriptor, resources: &[P]) -> Self {
        let resources = resources
            .iter()
            .map(|path| plan_resource(descriptor, path.as_ref()))
            .collect();

        let phases = Hook::ALL
            .into_iter()
            .map(|hook| Phase {
                hook,
                plugins: descriptor.plugins_for(hook).collect(),
            })
            .filter(|phase| !phase.plugins.is_empty())
            .collect();

        Self { resources, phases }
    }

    /// Resources that no rule claimed.
    pub fn pass_through(&self) -> impl Iterator<Item = &Path> {
        self.resources
            .iter()
            .filter(|r| r.action == Action::PassThrough)
            .map(|r| r.path.as_path())
    }
}

fn plan_resource<'a>(descriptor: &'a PipelineDescriptor, path: &Path) -> PlannedResource<'a> {
    let mut matching = descriptor.rules.matching(path).into_iter();

    let action = match matching.next() {
        Some(rule) => {
            let shadowed: Vec<_> = matching.map(|r| r.name.as_str()).collect();
            if !shadowed.is_empty() {
                crate::debug!("plan"; "{} also matches {}", path.display(), shadowed.join(", "));
            }
            Action::Transform {
                rule: &rule.name,
                steps: &rule.steps,
                shadowed,
            }
        }
        None => Action::PassThrough,
    };

    PlannedResource {
        path: path.to_path_buf(),
        action,
    }
}
