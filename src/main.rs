use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use csproj_version::cli::{run_bump_workflow, Args};
use csproj_version::config::load_config;
use csproj_version::{git, ui, Error};

/// Environment variable holding the log filter (e.g. `debug`)
const LOG_ENV: &str = "CSPROJ_VERSION_LOG";

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(err) = run(args) {
        ui::display_error(&format!("{:#}", err));
        let code = err.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    let config = load_config(args.config.as_deref(), &working_dir)?;
    let workflow = args.into_workflow_args(working_dir);

    let report = run_bump_workflow(&workflow, &config, ui::prompt_version, |dir| {
        git::open(config.git.backend, dir)
    })?;

    let stdout = std::io::stdout();
    ui::write_report(&mut stdout.lock(), &report).context("failed to write to stdout")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
