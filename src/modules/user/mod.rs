pub mod controller;
mod entity;
pub mod model;
pub mod repository;
pub mod service;

pub use controller::UserController;
pub use model::{CreateUser, UpdateUser, User};
pub use repository::{SeaOrmUserRepository, UserRepository};
pub use service::UserService;

pub(crate) use entity::Entity as UserEntity;

use crate::module::Module;
use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Repository → service → controller, wired by hand.
pub struct UserModule {
    controller: Arc<UserController>,
}

impl UserModule {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserService::new(repository));
        Self {
            controller: Arc::new(UserController::new(service)),
        }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmUserRepository::new(db)))
    }
}

impl Module for UserModule {
    fn base_path(&self) -> &'static str {
        UserController::base_path()
    }

    fn router(&self) -> Router {
        UserController::router(Arc::clone(&self.controller))
    }
}
