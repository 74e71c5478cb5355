//! shield - token authentication and rate limiting gateway

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use shield_rs::config::Config;
use shield_rs::server::ServerBuilder;
use shield_rs::utils::auth::crypto::keys::generate_secret;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shield", version, about)]
struct Args {
    /// YAML configuration file; the environment is used if it does not exist
    #[arg(short, long, default_value = "config/shield.yaml")]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Signing secret
    #[arg(long, env = "SHIELD_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print a fresh random secret and exit
    #[arg(long)]
    generate_secret: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.config.exists() {
        Config::from_file(&args.config)
            .await
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        info!("No configuration file at {:?}, using environment", args.config);
        Config::from_env().context("loading configuration from environment")?
    };

    if let Some(host) = &args.host {
        config.gateway.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }
    if let Some(secret) = &args.secret {
        config.gateway.auth.secret = Some(secret.clone());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args).await?;
    let server = ServerBuilder::new().with_config(config).build().await?;
    server.start().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.generate_secret {
        return match generate_secret() {
            Ok(secret) => {
                println!("{}", secret);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    init_tracing(args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
