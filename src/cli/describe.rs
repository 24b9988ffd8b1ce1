//! `describe` and `html` commands.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::descriptor::{HtmlDocument, PipelineDescriptor};
use crate::{debug, log};

/// Print the whole descriptor.
pub fn describe(descriptor: &PipelineDescriptor, pretty: bool) -> Result<()> {
    log!(
        "describe";
        "{} rules, {} plugins, {} documents",
        descriptor.rules.len(),
        descriptor.plugins.len(),
        descriptor.documents.len()
    );
    for entry in descriptor.entry.iter() {
        debug!("describe"; "entry {}", entry.display());
    }
    super::print_json(descriptor, pretty)
}

/// Print the document entry generated for each name.
pub fn html(names: &[String]) -> Result<()> {
    for name in names {
        let document = HtmlDocument::named(name);
        println!(
            "{} {} {} (inject: {}, mobile: {})",
            document.template.display(),
            "→".dimmed(),
            document.filename.green(),
            document.inject.as_str(),
            document.mobile,
        );
    }
    Ok(())
}
