use clap::Parser;
use repo_gateway::{
    api::{create_router, AppState},
    backend::InMemoryBackend,
    cli::{commands, Cli, Commands},
    config::{BackendKind, Settings},
    github::{GitHubClient, GitHubConfig},
    Error, Result,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repo_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            backend,
        } => {
            let settings = Settings::from_env()?;
            serve(settings, port, host, backend).await?;
        }
        Commands::Create { name, remote } => commands::create(&remote, &name).await?,
        Commands::List { remote } => commands::list(&remote).await?,
        Commands::Delete {
            owner,
            repo,
            remote,
        } => commands::delete(&remote, &owner, &repo).await?,
        Commands::Pulls {
            owner,
            repo,
            remote,
        } => commands::pulls(&remote, &owner, &repo).await?,
    }

    Ok(())
}

async fn serve(
    mut settings: Settings,
    port: Option<u16>,
    host: Option<String>,
    backend: Option<BackendKind>,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(backend) = backend {
        settings.backend = backend;
    }
    settings.validate()?;

    info!("Starting repository gateway");
    info!("Backend: {}", settings.backend);

    let state = match settings.backend {
        BackendKind::Github => {
            let github_config = GitHubConfig::from_env();
            info!(
                "GitHub API: {} (version {})",
                github_config.api_base_url, github_config.api_version
            );
            AppState::new(GitHubClient::new(github_config)?)
        }
        BackendKind::Memory => {
            warn!("In-memory backend selected; repositories are not sent to GitHub");
            AppState::new(InMemoryBackend::new())
        }
    };

    let app = create_router(state, &settings);

    // Start server
    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Repository Gateway");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Backend: {}", settings.backend);
    println!("\nAPI Endpoints:");
    println!("  POST   /repositories");
    println!("  GET    /repositories");
    println!("  DELETE /repositories/:owner/:repo");
    println!("  GET    /repositories/:owner/:repo/pulls");
    println!("  GET    /health");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
