//! Server configuration tree (`[server]`, `[store]`, `[logging]`).
//!
//! Every section is optional; absent keys take the defaults below.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 4583;
pub const DEFAULT_STORE_ROOT: &str = "configurations";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Cheaply cloneable handle to the loaded configuration.
///
/// Reads go through `Deref`; mutation through `DerefMut` copies on write, so
/// clones handed to other tasks never observe later edits.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    sections: Arc<Sections>,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl Deref for ApiConfig {
    type Target = Sections;

    fn deref(&self) -> &Sections {
        &self.sections
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut Sections {
        Arc::make_mut(&mut self.sections)
    }
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Serve HTTPS with these PEM files instead of plain HTTP.
    pub ssl: Option<SslConfig>,
}

impl ServerConfig {
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: DEFAULT_PORT, ssl: None }
    }
}

/// PEM certificate chain and private key. Both paths are required.
#[derive(Debug, Clone, Deserialize)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Location of the versioned specification snapshots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one `<configuration-id>.json` file per snapshot.
    pub root: PathBuf,
    /// Create `root` at startup when it is missing; otherwise startup fails.
    pub create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { root: PathBuf::from(DEFAULT_STORE_ROOT), create: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    /// Write log files as JSON lines.
    pub json: bool,
    /// Extra filter directives (e.g. `spechub_artifacts=debug`).
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_owned(), path: None, json: false, filter: None }
    }
}
