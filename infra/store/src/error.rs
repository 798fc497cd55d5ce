use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
///
/// Callers branch on [`StoreError::NotFound`] versus everything else.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Configuration not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot serialization failure{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl StoreError {
    /// Whether the failure means "no snapshot under this id" rather than a broken store.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Attaches human-readable context to store results.
pub trait StoreErrorExt<T> {
    /// # Errors
    /// Propagates the original error with `context` attached.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError>;
}

impl<T> StoreErrorExt<T> for Result<T, StoreError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            let (StoreError::NotFound { context: c, .. }
            | StoreError::Unavailable { context: c, .. }
            | StoreError::Io { context: c, .. }
            | StoreError::Serialization { context: c, .. }) = &mut e;
            *c = Some(context.into());
            e
        })
    }
}

impl<T> StoreErrorExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Io { source, context: Some(context.into()) })
    }
}

impl<T> StoreErrorExt<T> for Result<T, serde_json::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Serialization { source, context: Some(context.into()) })
    }
}

impl From<std::io::Error> for StoreError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
