use serde::{Deserialize, Serialize};
use crate::domain::dto::common::UserRef;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::{format_timestamp, Comment, Entity, User};

/// 댓글 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserRef,
    pub post: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CommentResponse {
    pub fn with_author(comment: Comment, author: Option<User>) -> Self {
        let mut response = Self::from(comment);
        if let Some(author) = author {
            response.user = UserRef::Populated(UserResponse::from(author));
        }
        response
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id_hex(),
            user: UserRef::Id(comment.user.to_hex()),
            post: comment.post.to_hex(),
            content: comment.content,
            created_at: format_timestamp(comment.created_at),
            updated_at: format_timestamp(comment.updated_at),
        }
    }
}

/// 댓글 작성 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
    pub message: String,
    pub successful: bool,
}

/// 게시물의 댓글 목록 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub successful: bool,
}
