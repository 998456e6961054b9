use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use axum::{Router, http::HeaderMap, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::address::AddressResolver;
use crate::config::{AppConfig, TlsConfig};
use crate::lookup::LocationWeatherLookup;
use crate::models::{ClientAddress, LookupResult};
use crate::{api, http, page};

/// Shared state for handlers
#[derive(Debug, Clone)]
pub struct AppState {
    lookup: LocationWeatherLookup,
    addresses: AddressResolver,
}

impl AppState {
    pub fn new(lookup: LocationWeatherLookup, addresses: AddressResolver) -> Self {
        Self { lookup, addresses }
    }

    /// Build the state with one HTTP client shared by every upstream service
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = http::build_client(&config.services.user_agent)?;
        Ok(Self::new(
            LocationWeatherLookup::from_config(&config.services, client.clone()),
            AddressResolver::new(config.deploy, client, &config.services.external_ip_url),
        ))
    }

    /// Run the lookup for `address`, or for the request's client when `None`
    pub async fn lookup(
        &self,
        headers: &HeaderMap,
        address: Option<ClientAddress>,
    ) -> crate::Result<LookupResult> {
        let address = match address {
            Some(address) => address,
            None => self.addresses.resolve(headers).await?,
        };
        self.lookup.lookup(&address).await
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::index))
        .nest("/api", api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: AppConfig) -> Result<()> {
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host '{}'", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);

    tracing::info!("Deploy mode: {:?}", config.deploy);
    let app = app(AppState::from_config(&config)?);

    match &config.server.tls {
        Some(tls) => serve_tls(addr, tls, app).await,
        None => serve(addr, app).await,
    }
}

async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(addr: SocketAddr, tls: &TlsConfig, app: Router) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;

    let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS certificate {} / key {}",
                tls.cert_path.display(),
                tls.key_path.display()
            )
        })?;

    let handle = axum_server::Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(None);
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, rustls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Web server failed")
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(_addr: SocketAddr, _tls: &TlsConfig, _app: Router) -> Result<()> {
    anyhow::bail!("server.tls is configured but this build lacks the `tls` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
