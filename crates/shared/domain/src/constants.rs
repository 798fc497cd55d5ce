/// `OpenAPI` tag for system routes (health, diagnostics).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for artifact retrieval routes.
pub const ARTIFACTS_TAG: &str = "Artifacts";

/// Environment prefix for configuration overrides (e.g. `SPECHUB__SERVER__PORT`).
pub const ENV_PREFIX: &str = "SPECHUB";
/// File extension of serialized specification snapshots.
pub const SNAPSHOT_EXTENSION: &str = "json";
