//! protenix-em — runs the Protenix structure prediction protocol.
//! Entry point for the command-line binary.

mod cli;
mod config;

use clap::Parser;
use protenix_protocol::{JsonFileRegistry, ProtenixProtocol, RunPaths};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, FormArgs, RunArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protenix=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("protenix-em {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Validate(form) => validate(&form),
        Commands::Run(args) => run(cli.config.as_deref(), &args).await,
    }
}

fn validate(args: &FormArgs) -> anyhow::Result<()> {
    let errors = args.to_form().validate();
    if errors.is_empty() {
        println!("ok");
        return Ok(());
    }
    for e in &errors {
        warn!("{}", e);
    }
    anyhow::bail!("validation failed: {}", errors.join(" "))
}

async fn run(config_path: Option<&std::path::Path>, args: &RunArgs) -> anyhow::Result<()> {
    let config = config::apply_overrides(config::load(config_path)?, args);
    info!(
        "Protenix executable: {}, seeds: {}, MSA server: {}",
        config.executable.path.display(),
        config.predict.seeds_arg(),
        config.predict.use_msa_server
    );

    let paths = RunPaths::new(&args.run_dir)?;
    let registry = Arc::new(JsonFileRegistry::new(paths.registry_path()));
    let mut protocol = ProtenixProtocol::new(config, paths, registry);

    let report = protocol.run(&args.form.to_form()).await?;

    for line in protocol.summary() {
        info!("{}", line);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
