//! CLI argument parsing module for vendorboot

use crate::bootstrapper::BootstrapArgs;
use crate::domain::Platform;
use clap::Parser;
use std::path::PathBuf;

/// Parse a platform name (linux, macos, windows)
fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse::<Platform>().map_err(|e| e.to_string())
}

/// Vendored dependency bootstrapper
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vendorboot",
    version,
    about = "Clone vendored dependencies and configure the CMake build"
)]
pub struct CliArgs {
    // Step flags
    /// Pull existing dependencies and rebuild the native dependency
    #[arg(short = 'U', long)]
    pub update: bool,

    /// Force configure even if the build directory exists
    #[arg(short = 'C', long = "configure")]
    pub force_configure: bool,

    /// Build after configuring
    #[arg(short = 'B', long)]
    pub build: bool,

    // Project options
    /// Project root (default: current directory)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/bootstrap.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target platform (default: host)
    #[arg(long, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Override the configured build type (e.g. Release)
    #[arg(long)]
    pub build_type: Option<String>,

    // General options
    /// Print the commands without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - spinner only, command output discarded
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Extract the step flags
    pub fn bootstrap_args(&self) -> BootstrapArgs {
        BootstrapArgs {
            update: self.update,
            force_configure: self.force_configure,
            build: self.build,
        }
    }

    /// Platform to target, defaulting to the host
    pub fn target_platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::host)
    }

    /// Whether step headers should be printed
    pub fn show_headers(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Whether the spinner should be shown
    pub fn show_progress(&self) -> bool {
        self.quiet && !self.json && !self.dry_run
    }
}
