use crate::account::AccountId;
use crate::error::Result;
use crate::paths;
use crate::step::{
    DeployPlan, StepCommand, DEFAULT_ACCOUNT_ID, DEFAULT_BUILD_PROGRAM, DEFAULT_CLI_PROGRAM,
    DEFAULT_WASM_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    fn warning(message: String) -> Self {
        Self {
            level: WarnLevel::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: WarnLevel::Error,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// DeployConfig
// ---------------------------------------------------------------------------

/// Contents of `.deploy/config.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    #[serde(default = "default_account_id")]
    pub account_id: AccountId,
    #[serde(default = "default_wasm_file")]
    pub wasm_file: String,
    #[serde(default = "default_build")]
    pub build: StepCommand,
    /// Deployment tool. `args` go before the `deploy` subcommand.
    #[serde(default = "default_cli")]
    pub cli: StepCommand,
}

fn default_account_id() -> AccountId {
    AccountId::from(DEFAULT_ACCOUNT_ID)
}

fn default_wasm_file() -> String {
    DEFAULT_WASM_FILE.to_string()
}

fn default_build() -> StepCommand {
    StepCommand::new(DEFAULT_BUILD_PROGRAM)
}

fn default_cli() -> StepCommand {
    StepCommand::new(DEFAULT_CLI_PROGRAM)
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            account_id: default_account_id(),
            wasm_file: default_wasm_file(),
            build: default_build(),
            cli: default_cli(),
        }
    }
}

/// Per-invocation replacements for config values, e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub account_id: Option<String>,
    pub wasm_file: Option<String>,
}

impl DeployConfig {
    /// Load the config for `root`, falling back to defaults when the file
    /// does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: DeployConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(id) = &overrides.account_id {
            self.account_id = AccountId::from(id.as_str());
        }
        if let Some(file) = &overrides.wasm_file {
            self.wasm_file = file.clone();
        }
        self
    }

    pub fn plan(&self) -> DeployPlan {
        DeployPlan::new(
            self.build.clone(),
            &self.cli,
            self.account_id.clone(),
            &self.wasm_file,
        )
    }

    /// Check the config for mistakes. Program lookups are resolved against
    /// `root` for relative paths and against `PATH` for bare names.
    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !self.account_id.is_valid() {
            warnings.push(ConfigWarning::error(format!(
                "account_id '{}' is not a valid NEAR account id",
                self.account_id
            )));
        }

        if self.wasm_file.trim().is_empty() {
            warnings.push(ConfigWarning::error("wasm_file is empty".to_string()));
        } else if !self.wasm_file.ends_with(".wasm") {
            warnings.push(ConfigWarning::warning(format!(
                "wasm_file '{}' does not end in .wasm",
                self.wasm_file
            )));
        }

        for (step, cmd) in [("build", &self.build), ("cli", &self.cli)] {
            if cmd.program.trim().is_empty() {
                warnings.push(ConfigWarning::error(format!("{step}.program is empty")));
                continue;
            }
            if !program_exists(root, &cmd.program) {
                warnings.push(ConfigWarning::warning(format!(
                    "{step}.program '{}' was not found",
                    cmd.program
                )));
            }
        }

        warnings
    }
}

fn program_exists(root: &Path, program: &str) -> bool {
    match paths::resolve_program(root, program) {
        Some(path) => path.is_file(),
        None => which::which(program).is_ok(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
