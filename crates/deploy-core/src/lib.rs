pub mod account;
pub mod config;
pub mod error;
pub mod io;
pub mod orchestrator;
pub mod paths;
pub mod runner;
pub mod step;

pub use error::{DeployError, Result};
