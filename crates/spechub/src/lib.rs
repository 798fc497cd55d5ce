//! Facade crate for `SpecHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature routes.
//! Keep this crate thin: it should compose other crates, not implement business logic.

pub use spechub_artifacts as artifacts;
pub use spechub_domain as domain;
pub use spechub_kernel as kernel;
pub use spechub_store as store;

pub mod server {
    pub mod router {
        use spechub_kernel::server::ApiState;
        pub use spechub_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes plus every enabled feature slice.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router().merge(spechub_artifacts::router())
        }
    }
}
