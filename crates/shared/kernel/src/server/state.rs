use axum::extract::FromRef;
use spechub_domain::config::ApiConfig;
use spechub_store::ConfigStore;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: Cow<'static, str> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub store: Arc<dyn ConfigStore>,
}

/// Cheaply cloneable state handed to every request handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Arc<dyn ConfigStore> {
    fn from_ref(state: &ApiState) -> Self {
        Arc::clone(&state.inner.store)
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn ConfigStore>>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] when no store was provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let store = self
            .store
            .ok_or(ApiStateError::Validation { message: "ConfigStore not provided".into() })?;

        Ok(ApiState {
            inner: Arc::new(ApiStateInner { config: self.config.unwrap_or_default(), store }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spechub_store::MemoryConfigStore;

    #[test]
    fn build_requires_store() {
        let err = ApiState::builder().config(ApiConfig::default()).build().unwrap_err();
        assert!(err.to_string().contains("ConfigStore"));
    }

    #[test]
    fn extractors_share_the_same_store() {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
        let state = ApiState::builder().store(Arc::clone(&store)).build().unwrap();

        let extracted = <Arc<dyn ConfigStore> as FromRef<ApiState>>::from_ref(&state);
        assert!(Arc::ptr_eq(&extracted, &store));
        assert_eq!(ApiConfig::from_ref(&state).server.port, 4583);
    }
}
