use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ACCOUNT_ID: &str = "room2.ostolex.testnet";
pub const DEFAULT_WASM_FILE: &str = "./target/wasm32-unknown-unknown/release/room.wasm";
pub const DEFAULT_BUILD_PROGRAM: &str = "./build.sh";
pub const DEFAULT_CLI_PROGRAM: &str = "near";

/// Exit code reported when a step's program could not be started, matching
/// what a shell reports for a missing command.
pub const COMMAND_NOT_FOUND: i32 = 127;

// ---------------------------------------------------------------------------
// StepCommand
// ---------------------------------------------------------------------------

/// One external command line: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl StepCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub code: i32,
}

impl StepOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

// ---------------------------------------------------------------------------
// DeployPlan
// ---------------------------------------------------------------------------

/// The two resolved command lines of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    pub account_id: AccountId,
    pub wasm_file: String,
    pub build: StepCommand,
    pub deploy: StepCommand,
}

impl DeployPlan {
    /// Build the plan. `cli` carries the deploy tool and any prefix
    /// arguments; the `deploy --accountId .. --wasmFile ..` tail is fixed.
    pub fn new(build: StepCommand, cli: &StepCommand, account_id: AccountId, wasm_file: &str) -> Self {
        let deploy = cli
            .clone()
            .arg("deploy")
            .arg("--accountId")
            .arg(account_id.as_str())
            .arg("--wasmFile")
            .arg(wasm_file);
        Self {
            account_id,
            wasm_file: wasm_file.to_string(),
            build,
            deploy,
        }
    }
}
