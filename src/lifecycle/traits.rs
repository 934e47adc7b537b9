use super::LifecycleError;
use async_trait::async_trait;

/// Acquire resources before the server accepts requests.
///
/// ```rust,ignore
/// #[async_trait]
/// impl OnModuleInit for Database {
///     async fn on_module_init(&mut self) -> Result<(), LifecycleError> {
///         self.connect().await.map_err(|e| LifecycleError::init_failed(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&mut self) -> Result<(), LifecycleError>;
}

/// Release resources after the server stops accepting requests.
///
/// Providers are destroyed in reverse registration order, so a provider
/// registered after its dependencies is torn down before them.
#[async_trait]
pub trait OnModuleDestroy: Send + Sync {
    async fn on_module_destroy(&mut self) -> Result<(), LifecycleError>;
}
