//! Profile service server.
//!
//! Serves create, read, and delete of profiles over HTTP, persisted to an
//! embedded redb database.
//!
//! # Usage
//!
//! ```text
//! GATEWAY_LISTEN=0.0.0.0:8080 profilesvc-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `PROFILESVC_DB_PATH` | `profiles.redb` | Database file |
//! | `PROFILESVC_COLLECTION` | `profiles` | Collection (table) name |
//! | `PROFILESVC_MAX_BODY_SIZE` | `1048576` | Request body limit in bytes |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use profilesvc_core::{ProfileConfig, ProfileEndpoints, RedbProfileService};
use profilesvc_http::service::{ProfileHttpConfig, ProfileHttpService};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

type Service = ProfileHttpService<ProfileEndpoints<RedbProfileService>>;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`ProfileHttpConfig`] from the [`ProfileConfig`].
fn build_http_config(config: &ProfileConfig) -> ProfileHttpConfig {
    ProfileHttpConfig {
        max_body_size: config.max_body_size,
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: Service) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                service.cancel_in_flight();
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Issue `GET /profile/0` against the local listener.
///
/// Any HTTP response counts as healthy, including a 404.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /profile/0 HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    // The write half stays open: hyper drops a connection whose read side
    // hits EOF before it has answered.
    writer.write_all(request.as_bytes()).await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if is_http_response(&response) {
        Ok(())
    } else {
        anyhow::bail!("no HTTP response from {addr}")
    }
}

fn is_http_response(raw: &str) -> bool {
    raw.starts_with("HTTP/")
}

/// Read the listen address from the environment.
fn gateway_listen_addr() -> String {
    std::env::var("GATEWAY_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

/// Read the log level from the environment.
fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let listen_addr = gateway_listen_addr();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = listen_addr.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let log = log_level();
    init_tracing(&log)?;

    let config = ProfileConfig::from_env();
    info!(
        db_path = %config.db_path.display(),
        collection = %config.collection,
        max_body_size = config.max_body_size,
        "initializing profile service",
    );

    let store = RedbProfileService::open(&config.db_path, config.collection.as_str())
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    store
        .ensure_collection()
        .with_context(|| format!("failed to initialize collection {}", config.collection))?;

    let endpoints = ProfileEndpoints::new(Arc::new(store));
    let service = ProfileHttpService::new(Arc::new(endpoints), build_http_config(&config));

    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {listen_addr}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting profile server");

    serve(listener, service).await
}
