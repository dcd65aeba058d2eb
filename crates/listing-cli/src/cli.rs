//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use listing_core::config::DEFAULT_GITHUB_API;

/// Build the Blender extensions repository: one zip per configured package
/// plus the listing Blender generates over them.
///
/// Examples:
///   gen-listing "/opt/blender-4.2/blender" ./_repo
///   gen-listing blender ./_repo --config packages.toml
#[derive(Parser, Debug)]
#[command(name = "gen-listing")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Blender executable used to generate the listing
    pub blender_executable: PathBuf,

    /// Directory receiving the package archives and the listing
    pub output_directory: PathBuf,

    /// TOML file with the `[[package]]` list (built-in packages when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_GITHUB_API)]
    pub github_api: String,

    /// Token for the GitHub REST API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Parent directory for temporary clones
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
