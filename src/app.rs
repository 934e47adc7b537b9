use crate::interceptor::log_requests;
use crate::module::Module;
use axum::{Router, middleware};

/// Mount every module under its base path, behind the request logger.
pub fn build_router(modules: &[&dyn Module]) -> Router {
    let router = modules.iter().fold(Router::new(), |router, module| {
        tracing::debug!(path = module.base_path(), "mounting module");
        router.nest(module.base_path(), module.router())
    });

    router.layer(middleware::from_fn(log_requests))
}
