//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use quill_core::domain::NewPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub img_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            created_at: model.created_at,
            img_name: model.img_name,
        }
    }
}

/// Conversion from a not-yet-stored post to an insertable ActiveModel.
///
/// Timestamps are stored in UTC so that text-backed columns (SQLite) still
/// sort chronologically. Display code applies the configured offset.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let (title, body) = post.content.into_parts();
        Self {
            id: NotSet,
            title: Set(title),
            body: Set(body),
            created_at: Set(post.created_at.with_timezone(&Utc).fixed_offset()),
            img_name: Set(post.img_name),
        }
    }
}
