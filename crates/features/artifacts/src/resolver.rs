//! Three-level lookup of a config template inside a service specification.
//!
//! Each level is a first-match linear scan over an ordered collection. A miss
//! reports every key that does exist at that level.

use spechub_domain::spec::{ConfigFileSpec, PodSpec, ServiceSpec, TaskSpec};

/// Why a pod/task/config triple did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("Couldn't find pod of type '{requested}'. Known pod types are: {known:?}")]
    PodNotFound { requested: String, known: Vec<String> },

    #[error(
        "Couldn't find task named '{requested}' within pod '{pod}'. Known task names are: {known:?}"
    )]
    TaskNotFound { requested: String, pod: String, known: Vec<String> },

    #[error(
        "Couldn't find config named '{requested}' within task '{task}'. Known config names are: {known:?}"
    )]
    ConfigNotFound { requested: String, task: String, known: Vec<String> },
}

/// An entry addressable by a string key within its parent.
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for PodSpec {
    fn key(&self) -> &str {
        &self.pod_type
    }
}

impl Keyed for TaskSpec {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for ConfigFileSpec {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Returns the first entry whose key equals `key`, or all keys in order.
fn find_keyed<'a, T: Keyed>(entries: &'a [T], key: &str) -> Result<&'a T, Vec<String>> {
    entries
        .iter()
        .find(|entry| entry.key() == key)
        .ok_or_else(|| entries.iter().map(|entry| entry.key().to_owned()).collect())
}

/// Locates the config template `config_name` of task `task_name` in pod `pod_type`.
///
/// Keys are compared exactly (case-sensitive). Duplicate keys are not an error;
/// the first match wins.
///
/// # Errors
/// Returns the [`ResolutionError`] of the first level that has no match, listing
/// the keys that level does contain.
///
/// # Example
/// ```rust
/// use spechub_artifacts::resolver::{ResolutionError, resolve};
/// use spechub_domain::spec::{ConfigFileSpec, PodSpec, ServiceSpec, TaskSpec};
///
/// let spec = ServiceSpec::new(
///     "hello-world",
///     [
///         PodSpec::new("web", [TaskSpec::new("server", [ConfigFileSpec::new("app.conf", "port=8080")])]),
///         PodSpec::new("db", []),
///     ],
/// );
///
/// assert_eq!(resolve(&spec, "web", "server", "app.conf").unwrap().template_content, "port=8080");
/// assert_eq!(
///     resolve(&spec, "cache", "server", "app.conf"),
///     Err(ResolutionError::PodNotFound {
///         requested: "cache".to_owned(),
///         known: vec!["web".to_owned(), "db".to_owned()],
///     })
/// );
/// ```
pub fn resolve<'a>(
    spec: &'a ServiceSpec,
    pod_type: &str,
    task_name: &str,
    config_name: &str,
) -> Result<&'a ConfigFileSpec, ResolutionError> {
    let pod = find_keyed(&spec.pods, pod_type)
        .map_err(|known| ResolutionError::PodNotFound { requested: pod_type.to_owned(), known })?;

    let task = find_keyed(&pod.tasks, task_name).map_err(|known| ResolutionError::TaskNotFound {
        requested: task_name.to_owned(),
        pod: pod.pod_type.clone(),
        known,
    })?;

    find_keyed(&task.config_files, config_name).map_err(|known| {
        ResolutionError::ConfigNotFound {
            requested: config_name.to_owned(),
            task: task.name.clone(),
            known,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ServiceSpec {
        ServiceSpec::new(
            "hello-world",
            [
                PodSpec::new(
                    "web",
                    [
                        TaskSpec::new(
                            "server",
                            [
                                ConfigFileSpec::new("app.conf", "port=8080"),
                                ConfigFileSpec::new("log.conf", "level=info"),
                            ],
                        ),
                        TaskSpec::new("sidecar", []),
                    ],
                ),
                PodSpec::new("db", [TaskSpec::new("postgres", [])]),
            ],
        )
    }

    #[test]
    fn resolves_full_path() {
        let spec = spec();
        let config = resolve(&spec, "web", "server", "log.conf").unwrap();
        assert_eq!(config.template_content, "level=info");
    }

    #[test]
    fn unknown_pod_lists_all_pod_types() {
        assert_eq!(
            resolve(&spec(), "cache", "server", "app.conf"),
            Err(ResolutionError::PodNotFound {
                requested: "cache".to_owned(),
                known: vec!["web".to_owned(), "db".to_owned()],
            })
        );
    }

    #[test]
    fn unknown_task_lists_tasks_of_matched_pod() {
        assert_eq!(
            resolve(&spec(), "web", "worker", "app.conf"),
            Err(ResolutionError::TaskNotFound {
                requested: "worker".to_owned(),
                pod: "web".to_owned(),
                known: vec!["server".to_owned(), "sidecar".to_owned()],
            })
        );
    }

    #[test]
    fn unknown_config_lists_configs_of_matched_task() {
        assert_eq!(
            resolve(&spec(), "web", "server", "missing.conf"),
            Err(ResolutionError::ConfigNotFound {
                requested: "missing.conf".to_owned(),
                task: "server".to_owned(),
                known: vec!["app.conf".to_owned(), "log.conf".to_owned()],
            })
        );
    }

    #[test]
    fn empty_level_reports_empty_alternatives() {
        assert_eq!(
            resolve(&spec(), "web", "sidecar", "app.conf"),
            Err(ResolutionError::ConfigNotFound {
                requested: "app.conf".to_owned(),
                task: "sidecar".to_owned(),
                known: vec![],
            })
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(matches!(
            resolve(&spec(), "Web", "server", "app.conf"),
            Err(ResolutionError::PodNotFound { .. })
        ));
    }

    #[test]
    fn first_duplicate_wins() {
        let spec = ServiceSpec::new(
            "dupes",
            [
                PodSpec::new("web", [TaskSpec::new("t", [ConfigFileSpec::new("c", "first")])]),
                PodSpec::new("web", [TaskSpec::new("t", [ConfigFileSpec::new("c", "second")])]),
            ],
        );
        assert_eq!(resolve(&spec, "web", "t", "c").unwrap().template_content, "first");
    }

    #[test]
    fn error_messages_name_the_alternatives() {
        let err = resolve(&spec(), "web", "worker", "app.conf").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Couldn't find task named 'worker' within pod 'web'. \
             Known task names are: [\"server\", \"sidecar\"]"
        );
    }
}
