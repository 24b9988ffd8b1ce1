//! webpipe - asset pipeline descriptor for script, stylesheet, font, image
//! and template builds.

mod cli;
mod config;
mod core;
mod descriptor;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;
use core::{Environment, MODE_VAR};
use descriptor::PipelineDescriptor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = PipelineConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    let mut env = Environment::capture(config.get_root().to_path_buf());
    if let Some(mode) = cli.mode {
        env.set_var(MODE_VAR, mode.name());
    }

    let descriptor = PipelineDescriptor::from_env(&env, &config);
    debug!("mode"; "{}", descriptor.mode);

    match &cli.command {
        Commands::Describe { pretty } => cli::describe::describe(&descriptor, *pretty),
        Commands::Resolve { paths } => cli::resolve::resolve(&descriptor, paths),
        Commands::Plan { paths, pretty } => cli::resolve::plan(&descriptor, paths, *pretty),
        Commands::Html { names } => cli::describe::html(names),
        Commands::Filename { class, file } => {
            cli::filename::filename(&descriptor, env.root(), *class, file)
        }
    }
}
