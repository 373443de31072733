//! HTTP surface of the portfolio content store.
//!
//! Read endpoints always go to storage; nothing is cached between requests.
//! Admin write endpoints are only mounted when admin mode is switched on, and carry
//! no authentication of their own.

use std::sync::Arc;

use application::PortfolioApp;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use config::Config;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod admin;
pub mod error;
pub mod handlers;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<PortfolioApp>,
}

pub fn router(app: Arc<PortfolioApp>, admin_enabled: bool) -> Router {
    let state = AppState { app };

    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/projects/:id", get(handlers::get_project))
        .route("/api/blogs", get(handlers::list_blogs))
        .route("/api/blogs/:slug", get(handlers::get_blog))
        .route("/api/blogs/:slug/related", get(handlers::related_blogs))
        .route("/api/blogs/:slug/blocks", get(handlers::blog_blocks))
        .route("/api/achievements", get(handlers::list_achievements))
        .route(
            "/api/achievements/grouped",
            get(handlers::grouped_achievements),
        )
        // Static deployment layout
        .route("/data/:file", get(handlers::static_document));

    if admin_enabled {
        router = router.route(
            "/api/admin/:collection",
            put(admin::replace_collection)
                .layer(DefaultBodyLimit::max(admin::MAX_DOCUMENT_BYTES)),
        );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn serve(config: &Config, app: Arc<PortfolioApp>) -> anyhow::Result<()> {
    app.report_missing_collections().await;

    let router = router(app, config.admin_enabled);

    let bind_address = config.api_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   GET  /api/profile                 - Profile document");
    info!("   GET  /api/projects?q=&filter=     - Projects, optionally filtered");
    info!("   GET  /api/projects/:id            - Single project");
    info!("   GET  /api/blogs?q=&filter=        - Blogs, filtered views newest first");
    info!("   GET  /api/blogs/:slug             - Single blog post");
    info!("   GET  /api/achievements            - Achievements");
    info!("   GET  /data/:name.json             - Static document layout");
    if config.admin_enabled {
        info!("   PUT  /api/admin/:collection       - Replace a collection");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
