//! 게시물 응답 DTO
use serde::{Deserialize, Serialize};
use crate::domain::dto::common::{PageInfo, UserRef};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::{format_timestamp, Entity, Like, Post, User};

/// 게시물 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    /// 작성자. 목록 조회에서는 사용자 객체로 채워집니다.
    pub user: UserRef,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl PostResponse {
    /// 작성자 정보를 채워 넣은 응답
    ///
    /// 작성자가 삭제된 경우 ID만 남깁니다.
    pub fn with_author(post: Post, author: Option<User>) -> Self {
        let mut response = Self::from(post);
        if let Some(author) = author {
            response.user = UserRef::Populated(UserResponse::from(author));
        }
        response
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let id = post.id_hex();
        let Post {
            user,
            title,
            content,
            media_url,
            tags,
            created_at,
            updated_at,
            ..
        } = post;

        Self {
            id,
            user: UserRef::Id(user.to_hex()),
            title,
            content,
            media_url,
            tags,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}

/// 좋아요 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub post: String,
    pub created_at: String,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            id: like.id_hex(),
            user: like.user.to_hex(),
            post: like.post.to_hex(),
            created_at: format_timestamp(like.created_at),
        }
    }
}

/// 게시물 목록 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub page_info: PageInfo,
    pub posts: Vec<PostResponse>,
    pub successful: bool,
}

/// 게시물 단건 응답 (`{post, message, successful}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostResponse,
    pub message: String,
    pub successful: bool,
}

impl PostEnvelope {
    pub fn new(post: PostResponse, message: &str) -> Self {
        Self {
            post,
            message: message.to_string(),
            successful: true,
        }
    }
}

/// 좋아요 응답 (`{like, message, successful}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeEnvelope {
    pub like: LikeResponse,
    pub message: String,
    pub successful: bool,
}

impl LikeEnvelope {
    pub fn new(like: Like, message: &str) -> Self {
        Self {
            like: LikeResponse::from(like),
            message: message.to_string(),
            successful: true,
        }
    }
}
