mod cmd;
mod output;
mod root;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::{config::ConfigSubcommand, run::RunArgs, run::RunExit};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "room-deploy",
    about = "Build the room contract and deploy it to its NEAR account",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .deploy/ or .git/)
    #[arg(long, global = true, env = "DEPLOY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, then deploy if the build succeeded (the default)
    Run(RunArgs),

    /// Write .deploy/config.yaml with the default settings
    Init,

    /// Inspect and validate the deploy configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(name) = misplaced_run_flags(&cli) {
        Cli::command()
            .error(
                clap::error::ErrorKind::ArgumentConflict,
                format!("--account-id, --wasm-file and --dry-run cannot be used with '{name}'"),
            )
            .exit();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        None => cmd::run::run(&root, &cli.run, cli.json),
        Some(Commands::Run(args)) => cmd::run::run(&root, &args.merged(&cli.run), cli.json),
        Some(Commands::Init) => cmd::init::run(&root, cli.json),
        Some(Commands::Config { subcommand }) => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Step failures were already reported while running.
        if let Some(exit) = e.downcast_ref::<RunExit>() {
            std::process::exit(exit.exit_code());
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Name of the subcommand that top-level run flags were given to, if it is
/// not `run`.
fn misplaced_run_flags(cli: &Cli) -> Option<&'static str> {
    if !cli.run.is_set() {
        return None;
    }
    match cli.command {
        Some(Commands::Init) => Some("init"),
        Some(Commands::Config { .. }) => Some("config"),
        Some(Commands::Run(_)) | None => None,
    }
}
