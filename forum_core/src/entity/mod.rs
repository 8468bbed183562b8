// SeaORM entities for the forum hierarchy: forum -> forum_topic -> forum_post

pub mod forum;
pub mod forum_post;
pub mod forum_topic;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::forum::{
        ActiveModel as ForumActiveModel, Column as ForumColumn, Entity as Forum,
        Model as ForumModel,
    };
    pub use super::forum_post::{
        ActiveModel as ForumPostActiveModel, Column as ForumPostColumn, Entity as ForumPost,
        Model as ForumPostModel,
    };
    pub use super::forum_topic::{
        ActiveModel as ForumTopicActiveModel, Column as ForumTopicColumn, Entity as ForumTopic,
        Model as ForumTopicModel,
    };

    pub use sea_orm::{
        ActiveModelTrait,
        ActiveValue,

        ColumnTrait,
        ConnectionTrait,

        Database,
        DatabaseConnection,
        DbConn,
        DbErr,

        EntityTrait,
        JoinType,
        ModelTrait,
        NotSet,
        PaginatorTrait,
        QueryFilter,
        QueryOrder,
        QuerySelect,
        Related,
        RelationTrait,
        Set,
        TransactionTrait,
        Unchanged,
    };
}
