//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use slipway::BindingLang;

/// Slipway - compile a generated C++ source file into an executable or a
/// scripting-language binding module
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// C++ source file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Basename of a functors library. eg: `-l functors` => libfunctors.so
    #[arg(short = 'l', long = "lib-name", value_name = "LIBNAME")]
    pub lib_names: Vec<String>,

    /// Search directory for functors libraries
    #[arg(short = 'L', long = "lib-dir", value_name = "LIBDIR")]
    pub lib_dirs: Vec<PathBuf>,

    /// Debug build type
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    /// Generate a binding module for LANG instead of an executable
    #[arg(short = 's', long = "swig", value_name = "LANG", value_parser = parse_binding_lang)]
    pub binding: Option<BindingLang>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Read the toolchain description from FILE instead of the embedded one
    #[arg(long = "toolchain", value_name = "FILE")]
    pub toolchain: Option<PathBuf>,
}

fn parse_binding_lang(s: &str) -> Result<BindingLang, String> {
    s.parse()
}
