use super::{LifecycleError, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

struct Registered<T: ?Sized> {
    provider: Arc<RwLock<T>>,
    name: String,
}

/// Ordered registry of init and destroy hooks.
#[derive(Default)]
pub struct LifecycleManager {
    init: Vec<Registered<dyn OnModuleInit>>,
    destroy: Vec<Registered<dyn OnModuleDestroy>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_init<T>(&mut self, provider: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleInit + 'static,
    {
        let provider: Arc<RwLock<dyn OnModuleInit>> = provider;
        self.init.push(Registered {
            provider,
            name: name.into(),
        });
    }

    pub fn register_destroy<T>(&mut self, provider: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleDestroy + 'static,
    {
        let provider: Arc<RwLock<dyn OnModuleDestroy>> = provider;
        self.destroy.push(Registered {
            provider,
            name: name.into(),
        });
    }

    /// Run init hooks in registration order, stopping at the first failure.
    pub async fn call_module_init(&self) -> Result<()> {
        for hook in &self.init {
            tracing::debug!(provider = %hook.name, "initializing");
            let mut provider = hook.provider.write().await;
            provider.on_module_init().await.map_err(|e| {
                tracing::error!(provider = %hook.name, "OnModuleInit failed: {}", e);
                LifecycleError::HookFailed {
                    provider: hook.name.clone(),
                    message: e.to_string(),
                }
            })?;
        }

        tracing::info!("OnModuleInit complete ({} providers)", self.init.len());
        Ok(())
    }

    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_init())
            .await
            .map_err(|_| LifecycleError::Timeout {
                phase: "OnModuleInit",
                after: timeout,
            })?
    }

    /// Run destroy hooks in reverse registration order. A failing hook is
    /// logged and the remaining hooks still run.
    pub async fn call_module_destroy(&self) -> Result<()> {
        for hook in self.destroy.iter().rev() {
            tracing::debug!(provider = %hook.name, "destroying");
            let mut provider = hook.provider.write().await;
            if let Err(e) = provider.on_module_destroy().await {
                tracing::error!(provider = %hook.name, "OnModuleDestroy failed: {}", e);
            }
        }

        tracing::info!("OnModuleDestroy complete ({} providers)", self.destroy.len());
        Ok(())
    }

    pub fn init_hook_count(&self) -> usize {
        self.init.len()
    }

    pub fn destroy_hook_count(&self) -> usize {
        self.destroy.len()
    }
}
