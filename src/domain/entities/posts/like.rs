use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::Entity;

/// 좋아요 엔티티 (`likes` 컬렉션)
///
/// 사용자와 게시물 쌍마다 최대 하나만 존재합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub post: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Like {
    pub fn new(user: ObjectId, post: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user,
            post,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Like {
    const COLLECTION: &'static str = "likes";

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
