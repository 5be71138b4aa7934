//! vendorboot - Vendored dependency bootstrapper CLI tool
//!
//! Clones or updates the vendored dependencies, builds the native one and
//! runs the CMake configure/build steps.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vendorboot::bootstrapper::Bootstrapper;
use vendorboot::cli::CliArgs;
use vendorboot::config::BootstrapConfig;
use vendorboot::domain::BootstrapReport;
use vendorboot::error::IoError;
use vendorboot::output::{create_formatter, OutputConfig};
use vendorboot::progress::Progress;
use vendorboot::runner::{CommandRunner, DryRunRunner, SystemRunner};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_logging(args.verbose);

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber on stderr
fn init_logging(verbose: bool) {
    let level = if verbose { "vendorboot=debug" } else { "vendorboot=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let root = resolve_root(&args.root)?;

    let mut config = BootstrapConfig::load(&root, args.config.as_deref())?;
    if let Some(build_type) = &args.build_type {
        config.build_type = build_type.clone();
    }
    config.validate()?;

    let platform = args.target_platform();
    if args.verbose {
        eprintln!("vendorboot v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Root: {}", root.display());
        eprintln!("Platform: {}", platform);
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let report = if args.dry_run {
        let runner = if args.json {
            DryRunRunner::silent()
        } else {
            DryRunRunner::new()
        };
        execute(&args, &config, root, runner)
    } else {
        let runner = if args.quiet || args.json {
            SystemRunner::quiet()
        } else {
            SystemRunner::new()
        };
        execute(&args, &config, root, runner)
    };

    let color = !args.no_color && io::stdout().is_terminal();
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(report.exit_code()))
}

/// Run the bootstrapper with the given runner
fn execute<R: CommandRunner>(
    args: &CliArgs,
    config: &BootstrapConfig,
    root: PathBuf,
    runner: R,
) -> BootstrapReport {
    let mut bootstrapper =
        Bootstrapper::new(config, args.bootstrap_args(), args.target_platform(), root, runner)
            .with_headers(args.show_headers())
            .with_progress(Progress::new(args.show_progress()))
            .with_dry_run(args.dry_run);
    bootstrapper.run()
}

/// Make the project root absolute, failing if it does not exist
fn resolve_root(root: &std::path::Path) -> Result<PathBuf, IoError> {
    if !root.is_dir() {
        return Err(IoError::directory_not_found(root));
    }
    root.canonicalize().map_err(|e| IoError::generic(root, e))
}
