use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::contract::model::User;
use crate::domain::query::UserField;

/// One row per user document. `id` is the primary key, so the store rejects
/// a second insert with the same id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            nickname: m.nickname,
            password: m.password,
            email: m.email,
            country: m.country,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<UserField> for Column {
    fn from(field: UserField) -> Self {
        match field {
            UserField::Id => Column::Id,
            UserField::FirstName => Column::FirstName,
            UserField::LastName => Column::LastName,
            UserField::Nickname => Column::Nickname,
            UserField::Email => Column::Email,
            UserField::Country => Column::Country,
        }
    }
}
