use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::Entity;

/// 팔로우 관계 엔티티 (`networks` 컬렉션)
///
/// `follower`가 `following`을 팔로우합니다. 같은 쌍은 한 번만 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub follower: ObjectId,
    pub following: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Network {
    pub fn new(follower: ObjectId, following: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            follower,
            following,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Network {
    const COLLECTION: &'static str = "networks";

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
