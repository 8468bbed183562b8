use crate::ids::{ForumId, PostId, TopicId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forum_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PostId,
    pub topic_id: TopicId,
    pub forum_id: Option<ForumId>,
    pub user_id: UserId,
    pub user_ip: String,
    /// Plain text with markup stripped.
    pub content: String,
    pub content_html: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_topic::Entity",
        from = "Column::TopicId",
        to = "super::forum_topic::Column::Id"
    )]
    ForumTopic,
}

impl Related<super::forum_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
