use super::model::{CreateUser, UpdateUser, User};
use super::repository::UserRepository;
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Stable entry point for user operations; forwards to the repository.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, data: CreateUser) -> Result<User> {
        self.repository.create(data).await
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn find_one(&self, id: i32) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    pub async fn update(&self, id: i32, data: UpdateUser) -> Result<User> {
        self.repository.update(id, data).await
    }

    pub async fn remove(&self, id: i32) -> Result<User> {
        self.repository.delete(id).await
    }
}
