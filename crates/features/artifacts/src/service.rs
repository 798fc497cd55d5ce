//! End-to-end template retrieval: id parsing, snapshot fetch, resolution.

use crate::resolver::resolve;
use spechub_domain::id::ConfigId;
use spechub_store::{ConfigStore, StoreError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Caller-visible failure category.
///
/// Version, pod, task and config misses all collapse into [`FailureKind::NotFound`]
/// so the response never reveals the layout of a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The configuration id is not a canonical UUID.
    BadRequest,
    /// No such configuration, pod, task or config file.
    NotFound,
    /// The store could not answer.
    ServerError,
}

/// Outcome of one template request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateResult {
    Ok { content: String },
    Fail { kind: FailureKind },
}

impl TemplateResult {
    const fn fail(kind: FailureKind) -> Self {
        Self::Fail { kind }
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Ok { content } => Some(content),
            Self::Fail { .. } => None,
        }
    }
}

/// Resolves config templates against snapshots fetched fresh from a [`ConfigStore`].
///
/// Holds no cache; every call re-fetches, so it is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct TemplateService {
    store: Arc<dyn ConfigStore>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Returns the raw template text addressed by the four coordinates.
    ///
    /// A malformed `configuration_id` is rejected before the store is touched.
    pub async fn get_template(
        &self,
        configuration_id: &str,
        pod_type: &str,
        task_name: &str,
        config_name: &str,
    ) -> TemplateResult {
        info!(
            configuration_id,
            pod_type, task_name, config_name, "Attempting to fetch template"
        );

        let id = match ConfigId::parse(configuration_id) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to parse requested configuration id");
                return TemplateResult::fail(FailureKind::BadRequest);
            },
        };

        let spec = match self.store.fetch(&id).await {
            Ok(spec) => spec,
            Err(e @ StoreError::NotFound { .. }) => {
                warn!(id = %id, error = %e, "Requested configuration doesn't exist");
                return TemplateResult::fail(FailureKind::NotFound);
            },
            Err(e) => {
                error!(id = %id, error = %e, "Failed to fetch requested configuration");
                return TemplateResult::fail(FailureKind::ServerError);
            },
        };

        match resolve(&spec, pod_type, task_name, config_name) {
            Ok(config) => TemplateResult::Ok { content: config.template_content.clone() },
            Err(e) => {
                warn!(id = %id, error = %e, "Couldn't find requested template");
                TemplateResult::fail(FailureKind::NotFound)
            },
        }
    }
}
