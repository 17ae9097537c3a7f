use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::Entity;

/// 댓글 엔티티 (`comments` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 작성자 ID
    pub user: ObjectId,
    /// 대상 게시물 ID
    pub post: ObjectId,
    pub content: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Comment {
    pub fn new(user: ObjectId, post: ObjectId, content: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user,
            post,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Comment {
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn assign_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}
