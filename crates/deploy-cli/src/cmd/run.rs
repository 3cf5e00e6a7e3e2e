use crate::output::{print_json, print_plan};
use anyhow::Context;
use clap::Args;
use deploy_core::{
    config::{DeployConfig, Overrides},
    orchestrator::{run_deployment, DeployEvent, Outcome, BUILD_FAILED_EXIT},
    runner::ProcessRunner,
};
use std::path::Path;

pub const BUILD_FAILED_MESSAGE: &str = "Build failed, aborting deployment.";
pub const BUILD_SUCCEEDED_MESSAGE: &str = "Build succeeded, deploying contract...";

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Account to deploy to (overrides config)
    #[arg(long)]
    pub account_id: Option<String>,

    /// Compiled contract to deploy (overrides config)
    #[arg(long)]
    pub wasm_file: Option<String>,

    /// Print the build and deploy commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn is_set(&self) -> bool {
        *self != RunArgs::default()
    }

    /// Combine flags given after `run` with ones given before it. Values
    /// after the subcommand win; `--dry-run` from either side applies.
    pub fn merged(self, outer: &RunArgs) -> RunArgs {
        RunArgs {
            account_id: self.account_id.or_else(|| outer.account_id.clone()),
            wasm_file: self.wasm_file.or_else(|| outer.wasm_file.clone()),
            dry_run: self.dry_run || outer.dry_run,
        }
    }
}

// ---------------------------------------------------------------------------
// RunExit
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum RunExit {
    BuildFailed,
    DeployFailed(i32),
}

impl RunExit {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunExit::BuildFailed => BUILD_FAILED_EXIT,
            RunExit::DeployFailed(c) => *c,
        }
    }
}

impl std::fmt::Display for RunExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunExit::BuildFailed => write!(f, "build failed"),
            RunExit::DeployFailed(code) => write!(f, "deploy exited with code {code}"),
        }
    }
}

impl std::error::Error for RunExit {}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub fn run(root: &Path, args: &RunArgs, json: bool) -> anyhow::Result<()> {
    let config = DeployConfig::load(root)
        .context("failed to load config")?
        .with_overrides(&Overrides {
            account_id: args.account_id.clone(),
            wasm_file: args.wasm_file.clone(),
        });
    let plan = config.plan();

    if args.dry_run {
        if json {
            print_json(&plan)?;
        } else {
            print_plan(&plan);
        }
        return Ok(());
    }

    let mut runner = ProcessRunner::new(root);
    let outcome = run_deployment(&plan, &mut runner, |event| {
        if json {
            return;
        }
        match event {
            DeployEvent::BuildFailed { .. } => eprintln!("{BUILD_FAILED_MESSAGE}"),
            DeployEvent::BuildSucceeded => println!("{BUILD_SUCCEEDED_MESSAGE}"),
            DeployEvent::DeployFinished { code } if code != 0 => {
                eprintln!("Deploy exited with code {code}.")
            }
            _ => {}
        }
    })
    .context("deployment aborted")?;

    if json {
        let (build_code, deploy_code) = match outcome {
            Outcome::BuildFailed { code } => (code, None),
            Outcome::Deployed { code } => (0, Some(code)),
        };
        print_json(&serde_json::json!({
            "status": if outcome.is_success() { "success" } else { "failed" },
            "account_id": plan.account_id,
            "wasm_file": plan.wasm_file,
            "build_code": build_code,
            "deploy_code": deploy_code,
        }))?;
    }

    match outcome {
        Outcome::BuildFailed { .. } => Err(RunExit::BuildFailed.into()),
        Outcome::Deployed { code: 0 } => Ok(()),
        Outcome::Deployed { code } => Err(RunExit::DeployFailed(code).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_before_run_are_kept() {
        let outer = RunArgs {
            account_id: Some("lobby.ostolex.testnet".to_string()),
            wasm_file: None,
            dry_run: true,
        };
        let merged = RunArgs::default().merged(&outer);
        assert_eq!(merged, outer);
    }

    #[test]
    fn flags_after_run_take_precedence() {
        let outer = RunArgs {
            account_id: Some("outer.testnet".to_string()),
            wasm_file: Some("outer.wasm".to_string()),
            dry_run: false,
        };
        let inner = RunArgs {
            account_id: Some("inner.testnet".to_string()),
            ..RunArgs::default()
        };
        let merged = inner.merged(&outer);
        assert_eq!(merged.account_id.as_deref(), Some("inner.testnet"));
        assert_eq!(merged.wasm_file.as_deref(), Some("outer.wasm"));
        assert!(!merged.dry_run);
    }

    #[test]
    fn default_args_are_unset() {
        assert!(!RunArgs::default().is_set());
        assert!(RunArgs {
            dry_run: true,
            ..RunArgs::default()
        }
        .is_set());
    }

    #[test]
    fn build_failure_exits_with_fixed_code() {
        assert_eq!(RunExit::BuildFailed.exit_code(), 1);
    }

    #[test]
    fn deploy_failure_exits_with_tool_code() {
        assert_eq!(RunExit::DeployFailed(3).exit_code(), 3);
        assert_eq!(RunExit::DeployFailed(3).to_string(), "deploy exited with code 3");
    }

    #[test]
    fn run_exit_survives_anyhow_round_trip() {
        let err: anyhow::Error = RunExit::DeployFailed(7).into();
        let exit = err.downcast_ref::<RunExit>().unwrap();
        assert_eq!(exit.exit_code(), 7);
    }
}
