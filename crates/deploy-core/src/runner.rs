use crate::error::{DeployError, Result};
use crate::paths;
use crate::step::{StepCommand, StepOutcome};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Runs one step to completion and reports its exit status.
pub trait StepRunner {
    fn run(&mut self, cmd: &StepCommand) -> Result<StepOutcome>;
}

/// Spawns each step as a child process in `cwd` with inherited stdio and
/// blocks until it exits.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
}

impl ProcessRunner {
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
        }
    }
}

impl StepRunner for ProcessRunner {
    fn run(&mut self, cmd: &StepCommand) -> Result<StepOutcome> {
        if cmd.program.trim().is_empty() {
            return Err(DeployError::EmptyCommand);
        }
        tracing::debug!(cwd = %self.cwd.display(), command = %cmd, "spawning");

        let program = paths::resolve_program(&self.cwd, &cmd.program)
            .unwrap_or_else(|| PathBuf::from(&cmd.program));
        let mut child = Command::new(program)
            .args(&cmd.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DeployError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| DeployError::Wait {
            program: cmd.program.clone(),
            source,
        })?;

        Ok(StepOutcome::from_code(exit_code(status)))
    }
}

/// Exit code of a finished process. Signal deaths map to `128 + signal`
/// like a shell reports them.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
