//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use forum_core::domain::{NewPost, NewUser, Post, User};
use forum_core::error::RepoError;
use forum_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, classify_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(model.into())
    }

    async fn get_post(&self, id: i64) -> Result<Post, RepoError> {
        Ok(self.fetch_by_id(id).await?.into())
    }

    async fn list_posts(&self, limit: u64, offset: u64) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(classify_db_err)
    }

    async fn update_post(&self, id: i64, content: &str) -> Result<Post, RepoError> {
        // Single UPDATE ... RETURNING so the write is atomic.
        let rows = PostEntity::update_many()
            .col_expr(post::Column::Content, Expr::value(content))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(classify_db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        self.remove_by_id(id).await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(model.into())
    }

    async fn get_user(&self, user_name: &str) -> Result<User, RepoError> {
        tracing::debug!(user_name, "Finding user by user name");

        UserEntity::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(classify_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn list_users(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(classify_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
