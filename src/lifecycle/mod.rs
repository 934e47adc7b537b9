//! Startup and shutdown hooks.
//!
//! ```text
//! load config → build providers → OnModuleInit (registration order)
//!   → serve → shutdown signal → OnModuleDestroy (reverse order)
//! ```
//!
//! Providers that own external resources (the database pool) implement the
//! hooks and are registered on an [`Application`] before the server starts.

mod application;
mod error;
mod manager;
mod shutdown;
mod traits;

pub use application::{Application, ApplicationBuilder};
pub use error::{LifecycleError, Result};
pub use manager::LifecycleManager;
pub use shutdown::shutdown_signal;
pub use traits::{OnModuleDestroy, OnModuleInit};
