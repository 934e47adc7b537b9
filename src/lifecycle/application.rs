use super::{LifecycleError, LifecycleManager, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Providers that have been through `OnModuleInit` and will be torn down on
/// [`Application::shutdown`].
///
/// ```rust,ignore
/// let database = Arc::new(RwLock::new(Database::new(config.database)));
/// let app = Application::builder()
///     .register_lifecycle(Arc::clone(&database), "Database")
///     .init_timeout(Duration::from_secs(30))
///     .build()
///     .await?;
///
/// // serve...
///
/// app.shutdown().await?;
/// ```
pub struct Application {
    lifecycle_manager: Arc<LifecycleManager>,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    pub fn lifecycle_manager(&self) -> &Arc<LifecycleManager> {
        &self.lifecycle_manager
    }

    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down application...");
        self.lifecycle_manager.call_module_destroy().await?;
        tracing::info!("Application shutdown complete");
        Ok(())
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    lifecycle_manager: LifecycleManager,
    init_timeout: Option<Duration>,
}

impl ApplicationBuilder {
    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    pub fn on_init<T>(mut self, provider: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + 'static,
    {
        self.lifecycle_manager.register_init(provider, name);
        self
    }

    pub fn on_destroy<T>(mut self, provider: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnModuleDestroy + 'static,
    {
        self.lifecycle_manager.register_destroy(provider, name);
        self
    }

    /// Register a provider for both init and destroy.
    pub fn register_lifecycle<T>(self, provider: Arc<RwLock<T>>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + OnModuleDestroy + 'static,
    {
        let name = name.into();
        self.on_init(Arc::clone(&provider), name.clone())
            .on_destroy(provider, name)
    }

    /// Run every init hook. On failure the providers already initialized are
    /// destroyed before the error is returned.
    pub async fn build(self) -> Result<Application> {
        tracing::info!("Starting application initialization...");

        let result = match self.init_timeout {
            Some(timeout) => {
                self.lifecycle_manager
                    .call_module_init_with_timeout(timeout)
                    .await
            }
            None => self.lifecycle_manager.call_module_init().await,
        };

        if let Err(e) = result {
            if let Err(cleanup) = self.lifecycle_manager.call_module_destroy().await {
                tracing::error!("Cleanup after failed init also failed: {}", cleanup);
            }
            return Err(LifecycleError::init_failed(e.to_string()));
        }

        tracing::info!("Application initialization complete");
        Ok(Application {
            lifecycle_manager: Arc::new(self.lifecycle_manager),
        })
    }
}
