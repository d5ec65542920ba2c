use anyhow::Context;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dashboard_gate::{app, auth, config, cors_layer, state::AppState};

#[derive(Parser)]
#[command(name = "dashboard-gate")]
#[command(about = "Session-gated dashboard page server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DASHBOARD_PORT/PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print the SHA-256 digest of a password for use in AUTH_USERS")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up AUTH_JWT_SECRET, AUTH_USERS, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::HashPassword { password } => {
            println!("{}", auth::password_digest(&password));
            Ok(())
        }
    }
}

async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting dashboard in {:?} mode", config.environment);

    let state = AppState::from_config(config);
    let mut router = app(state);
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    let port = port_override.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Dashboard listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
