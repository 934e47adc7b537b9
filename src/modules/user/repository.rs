use super::entity::{self, Entity as UserEntity};
use super::model::{CreateUser, UpdateUser, User};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, data: CreateUser) -> Result<User>;
    /// Every user, ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;
    async fn update(&self, id: i32, data: UpdateUser) -> Result<User>;
    /// Hard delete. Returns the removed record.
    async fn delete(&self, id: i32) -> Result<User>;
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> Result<entity::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, data: CreateUser) -> Result<User> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(id = model.id, "user created");
        Ok(model.into())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn update(&self, id: i32, data: UpdateUser) -> Result<User> {
        let mut active = self.find_model(id).await?.into_active_model();

        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(email) = data.email {
            active.email = Set(email);
        }
        active.updated_at = Set(Utc::now());

        // The row can vanish between the lookup and the write.
        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::user_not_found(id),
            other => other.into(),
        })?;
        tracing::debug!(id, "user updated");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<User> {
        let model = self.find_model(id).await?;

        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::user_not_found(id));
        }

        tracing::debug!(id, "user deleted");
        Ok(model.into())
    }
}
