//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading plus the HTTP server state
//! and system routes every application mounts.
//!
//! ## Config loading
//! ```rust,ignore
//! use spechub_kernel::config::load_config;
//! use spechub_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```

pub mod config;
pub mod server;

pub use spechub_domain as domain;
pub use spechub_store as store;
