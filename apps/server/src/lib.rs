//! # SpecHub Server
//!
//! Hosts the artifact API: opens the configuration store named by the
//! `[store]` section, mounts the system and artifact routes, and serves them
//! over HTTP or HTTPS until Ctrl+C or SIGTERM.
//!
//! ## Example
//! ```no_run
//! use spechub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, bail};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use spechub::domain::config::{ApiConfig, SslConfig};
use spechub::kernel::config::load_config;
use spechub::kernel::server::{ApiState, mark_started};
use spechub::store::{ConfigStore, FileConfigStore};
use spechub_logger::Logger;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Time in-flight template requests get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Loads the configuration file and installs logging from its `[logging]` section.
///
/// Keep the returned [`Logger`] alive for the lifetime of the process.
///
/// # Errors
/// Fails when the file is missing or malformed, or logging cannot be installed.
pub fn bootstrap(config_path: &Path) -> Result<(ApiConfig, Logger)> {
    let cfg: ApiConfig =
        load_config(Some(config_path)).context("Critical: Configuration is malformed")?;

    let logger = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)
        .context("Failed to initialize logging")?;
    info!(path = %config_path.display(), "Configuration loaded");

    Ok((cfg, logger))
}

/// Collects configuration and an optional pre-built store for a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    store: Option<Arc<dyn ConfigStore>>,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Overrides `server.port`.
    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Serves from `store` instead of opening `store.root` from the configuration.
    pub fn store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Validates TLS material, opens the store and assembles the [`ApiState`].
    ///
    /// # Errors
    /// Fails when a configured certificate or key file is missing, or when the
    /// store root is absent with `store.create = false` or cannot be resolved.
    pub async fn build(self) -> Result<Server> {
        let Self { cfg, store } = self;

        if let Some(ssl) = &cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let store = match store {
            Some(store) => store,
            None => open_file_store(&cfg).await?,
        };

        match store.list().await {
            Ok(ids) => info!(configurations = ids.len(), "Configuration store ready"),
            Err(e) => warn!(error = %e, "Configuration store could not be enumerated"),
        }

        let state = ApiState::builder().config(cfg).store(store).build()?;
        mark_started();
        info!(address = %state.config.server.socket_addr(), "Server initialized");

        Ok(Server { state })
    }
}

async fn open_file_store(cfg: &ApiConfig) -> Result<Arc<dyn ConfigStore>> {
    let store = FileConfigStore::builder()
        .root(&cfg.store.root)
        .create(cfg.store.create)
        .connect()
        .await
        .with_context(|| {
            format!("Failed to open configuration store at {}", cfg.store.root.display())
        })?;

    Ok(Arc::new(store))
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    if !ssl.cert.is_file() {
        bail!("SSL certificate not found at: {}", ssl.cert.display());
    }
    if !ssl.key.is_file() {
        bail!("SSL key not found at: {}", ssl.key.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                key = %ssl.key.display(),
                mode = %format!("{:o}", mode & 0o777),
                "SSL private key is readable by group or others; expected 600"
            );
        }
    }

    Ok(())
}

/// An initialized server, ready to accept connections.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete HTTP application, without binding a socket.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Binds the configured address and serves until a shutdown signal arrives.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the TLS material
    /// cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let address = self.state.config.server.socket_addr();
        let app = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(drain_on_signal(handle.clone()));

        match &self.state.config.server.ssl {
            Some(ssl) => {
                let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;

                info!("Serving templates on https://{address}");
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTPS server failed")?;
            },
            None => {
                info!("Serving templates on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTP server failed")?;
            },
        }

        info!("Server stopped");
        Ok(())
    }
}

async fn drain_on_signal(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(signal) => {
            info!(signal, grace_secs = SHUTDOWN_GRACE.as_secs(), "Draining connections");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        },
        Err(e) => error!("Cannot listen for shutdown signals: {e:#}"),
    }
}

/// Resolves with the name of the first shutdown signal received.
#[cfg(unix)]
async fn shutdown_signal() -> Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("Failed to install Ctrl+C handler")?;
            Ok("SIGINT")
        },
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c().await.context("Failed to install Ctrl+C handler")?;
    Ok("Ctrl+C")
}
