//! Native executable build mode.
//!
//! A single combined compile+link invocation producing an executable
//! beside the source file. No staging: the toolchain writes the artifact
//! in place.

use crate::error::Result;
use crate::toolchain::command::{CommandBuilder, LinkInput};
use crate::toolchain::ToolchainConfig;
use crate::util::fs::remove_file_if_exists;
use crate::util::process::CommandRunner;

use super::BuildRequest;

/// Build `<stem><exe_extension>` next to the source file.
pub fn build(
    config: &ToolchainConfig,
    runner: &dyn CommandRunner,
    request: &BuildRequest,
) -> Result<()> {
    let exe_name = format!("{}{}", request.stem(), config.exe_extension);
    let exe_path = request.source_dir().join(exe_name);

    // A leftover artifact from an earlier run must not survive a partial
    // failure and pass for a fresh build.
    remove_file_if_exists(&exe_path)?;

    let builder = CommandBuilder::new(config, request.debug);
    let cmd = builder.link_command(&LinkInput {
        inputs: vec![request.source.clone()],
        output: exe_path.clone(),
        shared: false,
        lib_dirs: request.lib_dirs.clone(),
        lib_names: request.lib_names.clone(),
        extra_ld_flags: Vec::new(),
    });

    tracing::debug!("building executable {}", exe_path.display());
    runner.run(&cmd, "compilation", None)?;

    Ok(())
}
