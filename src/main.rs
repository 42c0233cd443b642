use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai_service::cli::{Args, Command, ServeArgs, VerifyArgs};
use ai_service::config::Config;
use ai_service::contract::{contract_checks, run_checks, RemoteProbe};
use ai_service::llm::StatelessLLMFactory;
use ai_service::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ai_service=debug,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Some(Command::Verify(verify_args)) => verify(verify_args).await,
        Some(Command::Serve(serve_args)) => serve(serve_args).await,
        None => serve(ServeArgs::default()).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let (mut config, loaded_path) = Config::discover(args.config.as_deref())?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => warn!("No configuration file found, using defaults"),
    }

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if config.llm.api_key.is_none() {
        warn!(
            "No LLM api_key configured; requests to {} may be rejected",
            StatelessLLMFactory::resolve_base_url(&config.llm)?
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState::new(config)?;
    let app = ai_service::app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn verify(args: VerifyArgs) -> Result<()> {
    let probe = RemoteProbe::new(&args.base_url, args.timeout)?;
    let report = run_checks(&probe, &contract_checks(), args.rounds).await;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    report.ensure_passed()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
