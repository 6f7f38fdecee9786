//! Slipway CLI - a compiler driver for generated C++ sources

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slipway::util::process::SystemRunner;
use slipway::{BuildRequest, Driver, Error, ToolchainConfig};

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        // Toolchain failures propagate the child's exit status; the
        // captured streams were already surfaced by the runner.
        process::exit(e.exit_code());
    }
}

fn run() -> slipway::Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Toolchain description: embedded blob, or a file supplied alongside
    // the driver.
    let config = match &cli.toolchain {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(Error::io(format!(
                "failed to read toolchain description: {}",
                path.display()
            )))?;
            ToolchainConfig::parse(&text)?
        }
        None => ToolchainConfig::embedded()?,
    };

    let request = BuildRequest::new(
        &cli.source,
        cli.debug,
        cli.binding,
        &cli.lib_dirs,
        &cli.lib_names,
        cli.verbose,
    )?;

    let workdir = std::env::current_dir()
        .map_err(Error::io("failed to resolve the working directory"))?;
    let runner = SystemRunner::new(cli.verbose);

    Driver::new(&config, &runner, driver_root()?, workdir).run(&request)
}

/// Directory containing the driver executable; base of the
/// interface-directory search.
fn driver_root() -> slipway::Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(Error::io("failed to locate the driver executable"))?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
