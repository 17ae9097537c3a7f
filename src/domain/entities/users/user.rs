//! User Entity Implementation
//!
//! `users` 컬렉션에 저장되는 사용자 문서입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::Entity;
use crate::domain::models::auth::role::Role;

/// 사용자 엔티티
///
/// `password`에는 bcrypt 해시만 저장되며, 응답 DTO로 변환할 때 제외됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시
    pub password: String,
    /// 현재 역할. 접근 제어는 항상 이 값을 기준으로 합니다.
    #[serde(default)]
    pub role: Role,
    /// 프로필 이미지 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성 (아직 저장되지 않음)
    pub fn new(name: String, email: String, password_hash: String, role: Role, photo_url: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password: password_hash,
            role,
            photo_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

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

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_user_document_uses_camel_case() {
        let mut user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            Role::Admin,
            Some("https://cdn.example.com/jane.png".to_string()),
        );
        user.assign_id(ObjectId::new());

        let document = bson::to_document(&user).unwrap();
        assert!(document.contains_key("_id"));
        assert!(document.contains_key("photoUrl"));
        assert!(document.contains_key("createdAt"));
        assert_eq!(document.get_str("role").unwrap(), "admin");
    }

    #[test]
    fn test_missing_role_defaults_to_user() {
        let document = bson::doc! {
            "name": "Old",
            "email": "old@example.com",
            "password": "hash",
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        };

        let user: User = bson::from_document(document).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.id.is_none());
    }
}
