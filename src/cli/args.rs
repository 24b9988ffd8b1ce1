//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::BuildMode;
use crate::descriptor::AssetClass;

/// Asset pipeline descriptor for script, stylesheet, font, image and template builds
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: webpipe.toml)
    #[arg(short = 'C', long, global = true, default_value = crate::config::DEFAULT_CONFIG, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Build mode, overriding NODE_ENV (development, production)
    #[arg(short, long, global = true)]
    pub mode: Option<BuildMode>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the full pipeline descriptor as JSON
    #[command(visible_alias = "d")]
    Describe {
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the rule selected for each resource path
    #[command(visible_alias = "r")]
    Resolve {
        /// Resource paths, relative to the project root
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Dry-run build plan: resource transforms, then plugins per hook
    #[command(visible_alias = "p")]
    Plan {
        /// Resource paths, relative to the project root
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the HTML document entries generated for each page name
    Html {
        /// Page names (e.g. `index`, `slide-1`)
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Render the output filename a resource would get
    #[command(visible_alias = "f")]
    Filename {
        /// Asset class (script, stylesheet, font, image, document)
        class: AssetClass,

        /// Source file; its content feeds `[contenthash]`
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}
