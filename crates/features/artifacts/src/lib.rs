//! Artifact feature slice.
//!
//! Bootstrapping workers fetch the raw text of a config template by four
//! coordinates: configuration id, pod type, task name and config name.
//!
//! * [`resolver`] walks a [`ServiceSpec`](spechub_domain::spec::ServiceSpec)
//!   pod → task → config file and explains misses.
//! * [`service`] parses the id, fetches the snapshot and classifies every failure
//!   into a [`FailureKind`].
//! * [`api`] exposes the service over HTTP.

pub mod api;
pub mod resolver;
pub mod service;

pub use crate::api::router;
pub use crate::resolver::{ResolutionError, resolve};
pub use crate::service::{FailureKind, TemplateResult, TemplateService};
