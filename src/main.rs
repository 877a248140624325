//! Gatekeeper API - Request Authentication Gateway
//!
//! Sits in front of an HTTP application and verifies a bearer token on every
//! inbound request, publishes the caller identity for downstream handlers,
//! and enforces admin-only path prefixes. Admin operations are audit-logged.
//!
//! Business endpoints included here are thin demonstration handlers; the real
//! services live behind the gateway and consume identity through the request
//! extensions.

mod audit;
mod auth;
mod config;
mod error;
mod routes;
mod state;

use crate::auth::{issue_token, Role};
use crate::config::Settings;
use crate::routes::create_router;
use crate::state::{AppState, SharedState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    // Load configuration
    let settings = Settings::load()?;
    let state: SharedState = Arc::new(AppState::new(settings.auth.clone()));

    // Dev utility: mint a token for exercising the gateway without the
    // external identity provider running
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(command) = args.first() {
        return match command.as_str() {
            "issue" => issue_command(&state, &settings, &args[1..]),
            other => anyhow::bail!("unknown command: {}", other),
        };
    }

    info!("🚀 Starting Gatekeeper - Request Authentication Gateway...");
    info!("📋 Configuration loaded successfully");
    info!("   Exempt prefixes:    {:?}", settings.auth.exempt_prefixes);
    info!("   Protected prefixes: {:?}", settings.auth.admin_prefixes);

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   GET    /health                      - Liveness check (exempt)");
    info!("   GET    /todos                       - Demo handler (authenticated)");
    info!("   PATCH  /admin/users/{{user_id}}       - Demo admin handler (audited)");
    info!("   DELETE /admin/comments/{{comment_id}} - Demo admin handler (audited)");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// `gatekeeper-api issue <user_id> <email> <role>` - print a signed token
fn issue_command(state: &SharedState, settings: &Settings, args: &[String]) -> anyhow::Result<()> {
    let [user_id, email, role] = args else {
        anyhow::bail!("usage: gatekeeper-api issue <user_id> <email> <role>");
    };

    let user_id: i64 = user_id
        .parse()
        .map_err(|_| anyhow::anyhow!("user_id must be an integer"))?;
    let role: Role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let token = issue_token(
        user_id,
        email,
        role,
        &state.encoding_key,
        settings.auth.token_ttl_minutes,
    )?;
    println!("{}", token);
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gatekeeper_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .compact(),
        )
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
