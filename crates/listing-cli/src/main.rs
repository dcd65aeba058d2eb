//! gen-listing
//!
//! Builds the Blender extensions repository for the configured packages.

mod cli;
mod error;
mod logging;
mod summary;

use clap::Parser;
use colored::Colorize;
use listing_core::{GitHubConfig, GitHubReleases, ListingGenerator, Pipeline, RunConfig};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let output_dir = std::path::absolute(&cli.output_directory)?;
    println!("Blender Executable: {}", cli.blender_executable.display());
    println!("Output Directory:   {}", output_dir.display());

    let generator = ListingGenerator::new(&cli.blender_executable)?;
    let config = load_config(&cli)?;
    let releases = GitHubReleases::new(&config.github)?;

    let report = Pipeline::new(&config, &releases).run(&generator, &output_dir)?;
    summary::print(&report);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<RunConfig> {
    let config = match &cli.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading package config");
            RunConfig::load(path)?
        }
        None => RunConfig::new(RunConfig::default_packages()),
    };

    let mut config = config.with_github(GitHubConfig {
        api_url: cli.github_api.clone(),
        token: cli.github_token.clone(),
    });
    if let Some(dir) = &cli.scratch_dir {
        config = config.with_scratch_root(dir);
    }
    Ok(config)
}
