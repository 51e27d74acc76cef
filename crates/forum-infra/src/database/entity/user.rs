//! User entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use forum_core::domain::{NewUser, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_name: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            hashed_password: model.hashed_password,
            full_name: model.full_name,
            email: model.email,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewUser> for ActiveModel {
    fn from(user: NewUser) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            user_name: Set(user.user_name),
            hashed_password: Set(user.hashed_password),
            full_name: Set(user.full_name),
            email: Set(user.email),
            created_at: Set(Utc::now().into()),
        }
    }
}
