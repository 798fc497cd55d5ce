use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use spechub_domain::constants::ENV_PREFIX;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Default base name of the configuration file (`server.toml`, `server.json`, ...).
pub const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Attaches human-readable context to config results.
pub trait ConfigErrorExt<T> {
    /// # Errors
    /// Propagates the original error with `context` attached.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

/// Loads configuration by layering environment overrides on top of a file.
///
/// 1. **Base File**: settings from `path` (any format the `config` crate knows;
///    the extension may be omitted). Defaults to `server` in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `SPECHUB__`. Nested keys use
///    double underscores (e.g., `SPECHUB__STORE__ROOT` maps to `store.root`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file cannot be found, the environment
/// variables are malformed, or the result does not match `T`.
///
/// # Example
/// ```rust
/// use spechub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    load_config_with(&effective_path, env_overrides())
}

/// `SPECHUB__SECTION__KEY` variables, with numbers and booleans parsed.
fn env_overrides() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .convert_case(config::Case::Snake)
}

fn load_config_with<T>(path: &Path, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(env)
        .build()
        .context(format!("Failed to build config from {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
