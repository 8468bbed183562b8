use crate::ids::{ForumId, PostId, TopicId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forum")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ForumId,
    /// `None` (or the nil id carried over from imports) marks a top-level forum.
    pub parent_id: Option<ForumId>,
    pub title: String,
    pub slug: String,
    pub last_topic_id: Option<TopicId>,
    pub last_post_id: Option<PostId>,
    pub last_user_id: Option<UserId>,
    pub post_count: i64,
    pub created_at: String,
}

impl Model {
    /// Parent forum id, if this forum is nested under one.
    pub fn parent(&self) -> Option<ForumId> {
        self.parent_id.filter(|id| !id.is_nil())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::forum_topic::Entity")]
    ForumTopic,
}

impl Related<super::forum_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
