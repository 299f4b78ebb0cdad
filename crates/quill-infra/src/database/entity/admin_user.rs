//! Admin user entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    #[sea_orm(nullable)]
    pub mfa_secret: Option<String>,
    pub created_on: DateTimeWithTimeZone,
    pub updated_on: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::AdminUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            mfa_secret: model.mfa_secret,
            created_on: model.created_on.into(),
            updated_on: model.updated_on.into(),
        }
    }
}

impl From<quill_core::domain::AdminUser> for ActiveModel {
    fn from(author: quill_core::domain::AdminUser) -> Self {
        Self {
            id: Set(author.id),
            username: Set(author.username),
            password_hash: Set(author.password_hash),
            mfa_secret: Set(author.mfa_secret),
            created_on: Set(author.created_on.into()),
            updated_on: Set(author.updated_on.into()),
        }
    }
}
