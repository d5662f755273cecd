use clap::Parser;
use dotenvy::dotenv;
use lan_file_share::config::AppConfig;
use lan_file_share::infrastructure::storage;
use lan_file_share::{AppState, create_app};
use std::net::IpAddr;
use std::path::PathBuf;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line overrides; anything not given falls back to the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interface to bind
    #[arg(short, long)]
    bind: Option<IpAddr>,

    /// Port for the HTTP server
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory uploaded files are stored in
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(storage_dir) = self.storage_dir {
            config.storage_dir = storage_dir;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    // Initialize tracing with EnvFilter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lan_file_share=info,tower_http=info,metrics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting file share server...");

    let config = args.apply(AppConfig::from_env());
    info!(
        "⚙️  Config: Storage={}, Max Upload={}MB, Public={}, Styling={}",
        config.storage_dir.display(),
        config.max_upload_bytes / 1024 / 1024,
        config.public_dir.display(),
        config.styling_dir.display()
    );

    let storage_service = storage::setup_storage(&config).await?;
    let addr = config.socket_addr();
    let state = AppState::new(storage_service, config);

    let app = create_app(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            })
            .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                info!("📥 {} {}", request.method(), request.uri());
            })
            .on_response(
                |response: &axum::http::Response<_>,
                 latency: std::time::Duration,
                 _span: &tracing::Span| {
                    info!(
                        "📤 Finished in {:?} with status {}",
                        latency,
                        response.status()
                    );
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("✅ Server ready at http://{}", addr);
    info!("📂 Listing: http://{}/files", addr);
    info!("📖 Swagger UI: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
