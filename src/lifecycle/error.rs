use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Shutdown failed: {0}")]
    ShutdownFailed(String),

    #[error("Timeout during {phase} after {after:?}")]
    Timeout {
        phase: &'static str,
        after: std::time::Duration,
    },

    /// A registered provider's hook returned an error.
    #[error("{provider} failed: {message}")]
    HookFailed { provider: String, message: String },
}

impl LifecycleError {
    pub fn init_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    pub fn shutdown_failed(msg: impl Into<String>) -> Self {
        Self::ShutdownFailed(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
