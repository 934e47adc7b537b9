use axum::Router;

/// A feature module mounted under its own path prefix.
///
/// ```rust,ignore
/// let users = UserModule::from_connection(db);
/// let router = app::build_router(&[&users]);
/// ```
pub trait Module: Send + Sync {
    fn base_path(&self) -> &'static str;

    /// Routes relative to [`Module::base_path`].
    fn router(&self) -> Router;
}
