//! Scripting-language binding build mode.
//!
//! Two-phase build: the interface generator emits glue code, then the
//! glue is compiled together with the original source and linked into a
//! shared module. Everything runs inside a staged workspace; only the
//! designated outputs are copied back to the caller's directory, and
//! only on success.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::toolchain::command::{CommandBuilder, CommandLine, LinkInput};
use crate::toolchain::ToolchainConfig;
use crate::util::process::CommandRunner;

use super::interface;
use super::stage::StagedWorkspace;
use super::{BindingLang, BuildRequest};

/// Guard macro defined while compiling the source for embedding.
const EMBEDDED_DEFINE: &str = "-D__SLIPWAY_EMBEDDED__";

/// The generator's fixed two-file input contract.
const INTERFACE_HEADER: &str = "SwigInterface.h";
const INTERFACE_FILE: &str = "SwigInterface.i";

/// Sources the generator emits.
const WRAPPER_SOURCE: &str = "SwigInterface_wrap.cxx";
const WRAPPER_OBJECT: &str = "SwigInterface_wrap.o";
const PYTHON_GLUE: &str = "SwigInterface.py";

const GENERATOR: &str = "swig";
const PYTHON_PROBE: &str = "python3-config";

/// Language-specific parts of the build: probe-supplied flags and the
/// shared-module name. Which generated files are harvested differs per
/// language as well (see `harvest`).
struct Recipe {
    compile_flags: Vec<String>,
    link_flags: Vec<String>,
    module_name: &'static str,
}

/// Build a binding module for `lang` and place the outputs in `workdir`.
pub fn build(
    config: &ToolchainConfig,
    runner: &dyn CommandRunner,
    request: &BuildRequest,
    lang: BindingLang,
    driver_root: &Path,
    workdir: &Path,
) -> Result<()> {
    let swig_dir = interface::find_swig_dir(driver_root, config)?;

    let workspace = StagedWorkspace::create()?;
    workspace.stage(&swig_dir.join(INTERFACE_HEADER))?;
    workspace.stage(&swig_dir.join(INTERFACE_FILE))?;

    let generate = CommandLine::new(GENERATOR)
        .arg("-c++")
        .arg(format!("-{}", lang.as_str()))
        .arg(INTERFACE_FILE);
    runner.run(&generate, "interface generation", Some(workspace.path()))?;

    let recipe = resolve_recipe(config, runner, lang)?;

    let builder = CommandBuilder::new(config, request.debug);
    let compile = builder.compile_command(
        &[PathBuf::from(WRAPPER_SOURCE), request.source.clone()],
        &[
            "-fPIC".to_string(),
            "-c".to_string(),
            EMBEDDED_DEFINE.to_string(),
        ],
        &recipe.compile_flags,
    );
    runner.run(&compile, "glue compilation", Some(workspace.path()))?;

    let link = builder.link_command(&LinkInput {
        inputs: vec![
            PathBuf::from(WRAPPER_OBJECT),
            PathBuf::from(format!("{}.o", request.stem())),
        ],
        output: PathBuf::from(recipe.module_name),
        shared: true,
        lib_dirs: request.lib_dirs.clone(),
        lib_names: request.lib_names.clone(),
        extra_ld_flags: recipe.link_flags.clone(),
    });
    runner.run(&link, "module link", Some(workspace.path()))?;

    harvest(&workspace, &recipe, lang, workdir)?;

    tracing::debug!(
        "binding module {} placed in {}",
        recipe.module_name,
        workdir.display()
    );
    Ok(())
    // the workspace is dropped (and deleted) here and on every early
    // return above
}

/// Determine the per-language flags and module name.
fn resolve_recipe(
    config: &ToolchainConfig,
    runner: &dyn CommandRunner,
    lang: BindingLang,
) -> Result<Recipe> {
    match lang {
        BindingLang::Python => Ok(Recipe {
            compile_flags: probe_flags(runner, "--cflags")?,
            link_flags: probe_flags(runner, "--ldflags")?,
            module_name: "_SwigInterface.so",
        }),
        BindingLang::Java => Ok(Recipe {
            compile_flags: config
                .jni_include_list()
                .iter()
                .map(|dir| format!("-I{}", dir))
                .collect(),
            link_flags: Vec::new(),
            module_name: "libSwigInterface.so",
        }),
    }
}

/// Ask the scripting-runtime probe for a flag set.
fn probe_flags(runner: &dyn CommandRunner, arg: &str) -> Result<Vec<String>> {
    let cmd = CommandLine::new(PYTHON_PROBE).arg(arg);
    let output = runner.run(&cmd, "Python configuration", None)?;
    Ok(output
        .stdout
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

/// Copy the designated outputs back to the caller's directory.
fn harvest(
    workspace: &StagedWorkspace,
    recipe: &Recipe,
    lang: BindingLang,
    workdir: &Path,
) -> Result<()> {
    workspace.harvest(recipe.module_name, workdir)?;
    match lang {
        BindingLang::Python => {
            workspace.harvest(PYTHON_GLUE, workdir)?;
        }
        BindingLang::Java => {
            workspace.harvest_glob("*.java", workdir)?;
        }
    }
    Ok(())
}
