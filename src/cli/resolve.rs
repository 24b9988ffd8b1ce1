//! `resolve` and `plan` commands.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::descriptor::PipelineDescriptor;
use crate::logger::is_verbose;
use crate::{debug, log};

/// Print the selected rule and its steps for every path.
pub fn resolve(descriptor: &PipelineDescriptor, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let Some(rule) = descriptor.rule_for(path) else {
            println!("{} {}", path.display(), "pass-through".dimmed());
            continue;
        };

        if is_verbose() {
            let matching = descriptor.rules.matching(path);
            let shadowed: Vec<_> = matching.iter().skip(1).map(|r| r.name.as_str()).collect();
            if !shadowed.is_empty() {
                debug!("resolve"; "{} also matches {}", path.display(), shadowed.join(", "));
            }
        }

        let steps: Vec<_> = rule.steps.iter().map(|s| s.transform.as_str()).collect();
        println!(
            "{} {} {} [{}]",
            path.display(),
            "→".dimmed(),
            rule.name.green(),
            steps.join(" → ")
        );
    }
    Ok(())
}

/// Print the dry-run plan as JSON.
pub fn plan(descriptor: &PipelineDescriptor, paths: &[PathBuf], pretty: bool) -> Result<()> {
    let plan = descriptor.plan(paths);
    log!(
        "plan";
        "{} resources ({} pass-through), {} phases",
        plan.resources.len(),
        plan.pass_through().count(),
        plan.phases.len()
    );
    super::print_json(&plan, pretty)
}
