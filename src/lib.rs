//! # user-mesh
//!
//! User management over HTTP, layered the way a module-based web framework
//! lays it out:
//!
//! - [`modules::user::UserRepository`]: data access, backed by sea-orm
//! - [`modules::user::UserService`]: the stable API the controller depends on
//! - [`modules::user::UserController`]: `POST/GET /users`, `GET/PATCH/DELETE /users/{id}`
//!
//! Layers are wired by constructor, with no container:
//!
//! ```rust,no_run
//! use user_mesh::prelude::*;
//!
//! # async fn run() -> user_mesh::Result<()> {
//! let mut database = Database::new(DatabaseConfig::new("sqlite::memory:"));
//! database.connect().await?;
//!
//! let users = UserModule::from_connection(database.connection()?);
//! let router = build_router(&[&users]);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod interceptor;
pub mod lifecycle;
pub mod module;
pub mod modules;

pub use error::{AppError, Result};
pub use module::Module;

pub mod prelude {
    pub use crate::app::build_router;
    pub use crate::config::{AppConfig, ConfigService, DatabaseConfig};
    pub use crate::database::Database;
    pub use crate::error::{AppError, Result};
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, OnModuleDestroy, OnModuleInit,
        shutdown_signal,
    };
    pub use crate::module::Module;
    pub use crate::modules::user::{
        CreateUser, SeaOrmUserRepository, UpdateUser, User, UserController, UserModule,
        UserRepository, UserService,
    };
    pub use std::sync::Arc;
}
