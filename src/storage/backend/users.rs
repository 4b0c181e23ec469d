use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::errors::Result;
use migration::entities::user;

impl super::CatalogStorage {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn find_user_by_uuid(&self, uuid: &str) -> Result<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn user_email_exists(&self, email: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert_user(&self, model: user::ActiveModel) -> Result<user::Model> {
        model.insert(&self.db).await.map_err(Into::into)
    }
}
