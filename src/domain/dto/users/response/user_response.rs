use serde::{Deserialize, Serialize};
use crate::domain::dto::posts::response::PostResponse;
use crate::domain::entities::{format_timestamp, Entity};
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::role::Role;

/// 사용자 응답 DTO
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let id = user.id_hex();
        let User {
            name,
            email,
            role,
            photo_url,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            name,
            email,
            role,
            photo_url,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}

/// 사용자 단건 응답 (`{user, message?, successful}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub successful: bool,
}

impl UserEnvelope {
    pub fn new(user: User) -> Self {
        Self {
            user: UserResponse::from(user),
            message: None,
            successful: true,
        }
    }

    pub fn with_message(user: User, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::new(user)
        }
    }
}

/// 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub message: String,
    pub successful: bool,
}

impl LoginResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            user: UserResponse::from(user),
            token,
            message: "Login successful".to_string(),
            successful: true,
        }
    }
}

/// 프로필 응답 DTO
///
/// 내 정보, 내가 쓴 게시물, 나를 팔로우하는 사용자, 내가 팔로우하는 사용자를 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
    pub follower_list: Vec<UserResponse>,
    pub following_list: Vec<UserResponse>,
    pub successful: bool,
}
