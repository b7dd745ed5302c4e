use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::task::JoinHandle;
use tracing::{error, info};

use research_api::application::ports::service_directory::{ServiceDirectory, ServiceRegistration};
use research_api::application::services::registration::{CAPABILITIES, RegistrationHandshake};
use research_api::bootstrap::app_context::{AppContext, AppServices};
use research_api::bootstrap::config::Config;
use research_api::infrastructure::directory::ReqwestServiceDirectory;
use research_api::infrastructure::memory::{InMemoryMembershipIndex, InMemoryPaperRepository};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "research_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        service = %cfg.service_name,
        directory = %cfg.directory_url,
        "Starting research API"
    );

    let paper_repo = Arc::new(InMemoryPaperRepository::new());
    if cfg.seed_sample_papers {
        research_api::infrastructure::seed::seed_sample_papers(paper_repo.as_ref()).await?;
    }
    let memberships = Arc::new(InMemoryMembershipIndex::new(
        cfg.workspace_members.iter().copied(),
        cfg.site_members.iter().copied(),
    ));
    info!(
        workspace_pairs = memberships.workspace_pairs(),
        site_members = memberships.site_members(),
        "membership_index_loaded"
    );

    let directory: Arc<dyn ServiceDirectory> = Arc::new(ReqwestServiceDirectory::new(
        &cfg.directory_url,
        &cfg.directory_api_key,
        cfg.registration.attempt_timeout,
    )?);
    let handshake = RegistrationHandshake::new(
        directory,
        ServiceRegistration {
            name: cfg.service_name.clone(),
            capabilities: CAPABILITIES.iter().map(|c| c.to_string()).collect(),
            callback_url: cfg.public_base_url.clone(),
        },
        cfg.registration,
    );

    let services = AppServices::new(paper_repo, memberships, handshake.subscribe());
    let ctx = AppContext::new(cfg.clone(), services);
    let app = research_api::presentation::http::router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    info!(%api_addr, "HTTP API listening");

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    // Only announce once the listener is bound; the outcome never affects serving.
    let registration_handle = handshake.spawn();

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }

    if !registration_handle.is_finished() {
        registration_handle.abort();
    }
    Ok(())
}
