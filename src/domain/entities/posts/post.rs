use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::Entity;

/// 게시물 엔티티 (`posts` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 작성자 ID
    pub user: ObjectId,
    pub title: String,
    pub content: String,
    /// 첨부 미디어 URL. 업로드는 외부에서 처리되고 URL만 저장합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Post {
    pub fn new(author: ObjectId, title: String, content: String, tags: Vec<String>, media_url: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user: author,
            title,
            content,
            media_url,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: &ObjectId) -> bool {
        self.user == *user_id
    }
}

impl Entity for Post {
    const COLLECTION: &'static str = "posts";

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
