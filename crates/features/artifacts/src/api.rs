//! HTTP surface of the artifact slice.

use crate::service::{FailureKind, TemplateResult, TemplateService};
use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRef, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use spechub_domain::constants::ARTIFACTS_TAG;
use spechub_kernel::server::ApiState;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use tracing::warn;
use utoipa_axum::routes;

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

impl FailureKind {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TemplateResult {
    fn into_response(self) -> Response {
        match self {
            Self::Ok { content } => {
                ([(header::CONTENT_TYPE, TEXT_PLAIN_UTF_8)], content).into_response()
            },
            Self::Fail { kind } => kind.status().into_response(),
        }
    }
}

impl FromRef<ApiState> for TemplateService {
    fn from_ref(state: &ApiState) -> Self {
        Self::new(Arc::clone(&state.store))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplatePath {
    configuration_id: String,
    pod_type: String,
    task_name: String,
    config_name: String,
}

/// Raw content of a config template, for retrieval by bootstrapping workers.
#[utoipa::path(
    get,
    path = "/v1/artifacts/template/{configurationId}/{podType}/{taskName}/{configName}",
    params(
        ("configurationId" = String, Path, description = "Configuration id (canonical UUID)"),
        ("podType" = String, Path, description = "Pod type"),
        ("taskName" = String, Path, description = "Task name within the pod"),
        ("configName" = String, Path, description = "Config file name within the task"),
    ),
    responses(
        (status = OK, description = "Template content", body = String, content_type = "text/plain"),
        (status = BAD_REQUEST, description = "Malformed configuration id"),
        (status = NOT_FOUND, description = "Unknown configuration, pod, task or config"),
        (status = INTERNAL_SERVER_ERROR, description = "Configuration store failure"),
    ),
    tag = ARTIFACTS_TAG,
)]
pub(crate) async fn get_template(
    State(service): State<TemplateService>,
    path: Result<Path<TemplatePath>, PathRejection>,
) -> TemplateResult {
    match path {
        Ok(Path(path)) => {
            service
                .get_template(
                    &path.configuration_id,
                    &path.pod_type,
                    &path.task_name,
                    &path.config_name,
                )
                .await
        },
        Err(rejection) => {
            let kind = rejection_kind(&rejection);
            warn!(error = %rejection, ?kind, "Rejected template path");
            TemplateResult::Fail { kind }
        },
    }
}

/// A segment that is not valid UTF-8 can only name an unknown pod, task or
/// config; in the id position it is a malformed id.
fn rejection_kind(rejection: &PathRejection) -> FailureKind {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } if key.as_str() != "configurationId" => {
                FailureKind::NotFound
            },
            _ => FailureKind::BadRequest,
        },
        _ => FailureKind::ServerError,
    }
}

/// Routes of the artifact slice.
pub fn router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    TemplateService: FromRef<S>,
{
    OpenApiRouter::<S>::new().routes(routes!(get_template))
}
