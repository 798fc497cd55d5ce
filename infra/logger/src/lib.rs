//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for `SpecHub` binaries: a compact
//! ANSI console layer and an optional non-blocking rolling file layer (plain
//! text or JSON lines), both behind one [`EnvFilter`].
//!
//! Filtering starts from the configured level; explicit directives such as
//! `"spechub_artifacts=debug,tower_http=info"` refine it. Without directives,
//! `RUST_LOG` is honored.
//!
//! ## Example
//!
//! ```rust
//! # use spechub_logger::{LevelFilter, Logger};
//! let _logger = Logger::builder()
//!     .name("spechub-server")
//!     .level(LevelFilter::DEBUG)
//!     .directives("tower_http=info")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use spechub_domain::config::LoggingConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type OutputLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Rolling log files kept per directory unless overridden.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Rolling file destination.
#[derive(Debug, Clone)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileOutput {
    /// Daily-rotated plain-text files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Writes one JSON object per event instead of plain text.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    fn into_layer(self, prefix: &str) -> Result<(OutputLayer, WorkerGuard), LoggerError> {
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        std::fs::create_dir_all(&self.dir)
            .context(format!("Failed to create log directory: {}", self.dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(self.max_files)
            .build(&self.dir)?;

        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);

        let boxed = if self.json { layer.json().boxed() } else { layer.boxed() };
        Ok((boxed, guard))
    }
}

mod private {
    pub trait Sealed {}
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);

impl private::Sealed for Unnamed {}
impl private::Sealed for Named {}

/// Configures the global subscriber. A name is required before [`LoggerBuilder::init`].
#[allow(private_bounds)]
#[must_use = "The logger is not installed until you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder<N: private::Sealed = Unnamed> {
    name: N,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    file: Option<FileOutput>,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger; the name prefixes rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder {
            name: Named(name.into()),
            level: self.level,
            directives: self.directives,
            console: self.console,
            file: self.file,
        }
    }
}

#[allow(private_bounds)]
impl<N: private::Sealed> LoggerBuilder<N> {
    /// Default maximum level for targets without a directive.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// `EnvFilter` directives layered over the level; replaces `RUST_LOG`.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Toggles the console layer (on by default).
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Adds a rolling file layer.
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid filter directives '{directives}': {e}").into(),
                    context: None,
                })
            },
        }
    }
}

impl LoggerBuilder<Named> {
    /// Installs the subscriber for the whole process.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it flushes
    /// and stops the file writer.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for a blank name, bad directives,
    /// `max_files == 0` or no enabled output; [`LoggerError::Io`] and
    /// [`LoggerError::Appender`] when the log directory is unusable;
    /// [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0.trim();
        if name.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = self.filter()?;
        let mut outputs: Vec<OutputLayer> = Vec::with_capacity(2);

        if self.console {
            outputs.push(fmt::layer().compact().with_ansi(true).boxed());
        }

        let guard = match self.file {
            Some(file) => {
                let (layer, guard) = file.into_layer(name)?;
                outputs.push(layer);
                Some(guard)
            },
            None => None,
        };

        if outputs.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Neither console nor file output is enabled".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(outputs).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed subscriber; owns the file writer's flush guard.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: Unnamed,
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            file: None,
        }
    }

    /// Installs logging as described by the `[logging]` configuration section.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] if `level` is not a level name,
    /// plus everything [`LoggerBuilder::init`] returns.
    pub fn from_config(name: &str, cfg: &LoggingConfig) -> Result<Self, LoggerError> {
        let level = cfg.level.parse::<LevelFilter>().map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid log level '{}': {e}", cfg.level).into(),
                context: None,
            }
        })?;

        let mut builder = Self::builder().name(name).level(level);
        if let Some(directives) = &cfg.filter {
            builder = builder.directives(directives.as_str());
        }
        if let Some(dir) = &cfg.path {
            builder = builder.file(FileOutput::new(dir).json(cfg.json));
        }

        builder.init()
    }

    /// The file writer's guard, present when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Flushing log files");
        }
    }
}
