use crate::error::{DeployError, Result};
use crate::step::{DeployPlan, StepCommand, StepOutcome, COMMAND_NOT_FOUND};
use crate::runner::StepRunner;
use serde::Serialize;

/// Exit code of the orchestrator when the build step fails.
pub const BUILD_FAILED_EXIT: i32 = 1;

// ---------------------------------------------------------------------------
// DeployEvent
// ---------------------------------------------------------------------------

/// Progress of a deployment, emitted in order while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent<'a> {
    BuildStarted { command: &'a StepCommand },
    BuildFailed { code: i32 },
    BuildSucceeded,
    DeployStarted { command: &'a StepCommand },
    DeployFinished { code: i32 },
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The build step failed; nothing was deployed.
    BuildFailed { code: i32 },
    /// The build succeeded and the deploy tool ran with the given result.
    Deployed { code: i32 },
}

impl Outcome {
    /// Final exit status: fixed failure code for a broken build, otherwise
    /// whatever the deploy tool returned.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::BuildFailed { .. } => BUILD_FAILED_EXIT,
            Outcome::Deployed { code } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

// ---------------------------------------------------------------------------
// run_deployment
// ---------------------------------------------------------------------------

/// Run the build step, then the deploy step if and only if the build exited
/// with status zero.
///
/// A step whose program cannot be started counts as exiting with
/// [`COMMAND_NOT_FOUND`]. Other runner errors are returned as-is.
pub fn run_deployment<R, F>(plan: &DeployPlan, runner: &mut R, mut on_event: F) -> Result<Outcome>
where
    R: StepRunner + ?Sized,
    F: FnMut(DeployEvent<'_>),
{
    on_event(DeployEvent::BuildStarted {
        command: &plan.build,
    });
    let build = run_step(runner, &plan.build)?;
    if !build.success() {
        tracing::info!(code = build.code, "build failed, skipping deploy");
        on_event(DeployEvent::BuildFailed { code: build.code });
        return Ok(Outcome::BuildFailed { code: build.code });
    }
    on_event(DeployEvent::BuildSucceeded);

    on_event(DeployEvent::DeployStarted {
        command: &plan.deploy,
    });
    let deploy = run_step(runner, &plan.deploy)?;
    tracing::info!(
        account_id = %plan.account_id,
        wasm_file = %plan.wasm_file,
        code = deploy.code,
        "deploy finished"
    );
    on_event(DeployEvent::DeployFinished { code: deploy.code });
    Ok(Outcome::Deployed { code: deploy.code })
}

fn run_step<R: StepRunner + ?Sized>(runner: &mut R, cmd: &StepCommand) -> Result<StepOutcome> {
    match runner.run(cmd) {
        Ok(outcome) => Ok(outcome),
        Err(e @ (DeployError::Spawn { .. } | DeployError::EmptyCommand)) => {
            tracing::error!(command = %cmd, "{e}");
            Ok(StepOutcome::from_code(COMMAND_NOT_FOUND))
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
