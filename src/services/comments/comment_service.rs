//! 댓글 서비스 구현

use log::info;
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::comments::request::CreateCommentRequest;
use crate::domain::dto::comments::response::{CommentEnvelope, CommentListResponse, CommentResponse};
use crate::domain::entities::{Comment, Entity};
use crate::repositories::{CommentRepository, PostRepository, UserRepository};
use crate::utils::string_utils::{parse_object_id, required_field};

const COMMENT_INVALID: &str = "Please give valid comment for post";

/// 댓글 비즈니스 로직 서비스
///
/// 댓글은 존재하는 게시물에만 달 수 있습니다.
#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    posts: PostRepository,
    users: UserRepository,
}

impl CommentService {
    pub fn new(comments: CommentRepository, posts: PostRepository, users: UserRepository) -> Self {
        Self { comments, posts, users }
    }

    /// 댓글 작성
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 내용 또는 게시물 ID 누락, 잘못된 게시물 ID
    /// * `NotFound` - 게시물이 없음
    pub async fn create(&self, author: &ObjectId, request: CreateCommentRequest) -> AppResult<CommentEnvelope> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(COMMENT_INVALID.to_string()))?;

        let content = required_field(request.content, COMMENT_INVALID)?;
        let post_id = required_field(request.post_id, COMMENT_INVALID)?;
        let post_id = parse_object_id(&post_id, "post id")?;

        self.ensure_post_exists(&post_id).await?;

        let created = self.comments.create(Comment::new(*author, post_id, content)).await?;
        info!("💬 댓글 작성: {} (게시물 {})", created.id_hex(), post_id.to_hex());

        Ok(CommentEnvelope {
            comment: CommentResponse::from(created),
            message: "Comment created".to_string(),
            successful: true,
        })
    }

    /// 게시물의 댓글 목록 (작성자 정보 포함)
    pub async fn list_for_post(&self, post_id: &ObjectId) -> AppResult<CommentListResponse> {
        self.ensure_post_exists(post_id).await?;

        let comments = self.comments.find_by_post(post_id).await?;

        let mut author_ids: Vec<ObjectId> = comments.iter().map(|comment| comment.user).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors = self.users.find_many_by_ids(&author_ids).await?;

        let comments = comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.user).cloned();
                CommentResponse::with_author(comment, author)
            })
            .collect();

        Ok(CommentListResponse {
            comments,
            successful: true,
        })
    }

    async fn ensure_post_exists(&self, post_id: &ObjectId) -> AppResult<()> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Post not found".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::common::UserRef;
    use crate::domain::entities::{Post, User};
    use crate::domain::models::auth::role::Role;
    use crate::repositories::DataStores;

    async fn setup() -> (CommentService, ObjectId, ObjectId) {
        let stores = DataStores::memory();
        let users = UserRepository::new(stores.users.clone());
        let posts = PostRepository::new(stores.posts.clone());

        let author = users
            .create(User::new("n".to_string(), "n@example.com".to_string(), "h".to_string(), Role::User, None))
            .await
            .unwrap()
            .id
            .unwrap();
        let post = posts
            .create(Post::new(author, "t".to_string(), "c".to_string(), vec![], None))
            .await
            .unwrap()
            .id
            .unwrap();

        let service = CommentService::new(CommentRepository::new(stores.comments.clone()), posts, users);
        (service, author, post)
    }

    fn request(content: Option<&str>, post_id: Option<String>) -> CreateCommentRequest {
        CreateCommentRequest {
            content: content.map(str::to_string),
            post_id,
        }
    }

    #[actix_web::test]
    async fn test_create_and_list_comments() {
        let (service, author, post) = setup().await;

        let created = service
            .create(&author, request(Some("nice"), Some(post.to_hex())))
            .await
            .unwrap();
        assert_eq!(created.message, "Comment created");

        let listed = service.list_for_post(&post).await.unwrap();
        assert_eq!(listed.comments.len(), 1);
        assert_eq!(listed.comments[0].content, "nice");
        assert!(matches!(listed.comments[0].user, UserRef::Populated(ref u) if u.id == author.to_hex()));
    }

    #[actix_web::test]
    async fn test_create_validation_and_unknown_post() {
        let (service, author, post) = setup().await;

        let empty = service.create(&author, request(Some("  "), Some(post.to_hex()))).await;
        assert!(matches!(empty, Err(AppError::ValidationError(ref m)) if m == COMMENT_INVALID));

        let bad_id = service.create(&author, request(Some("x"), Some("nope".to_string()))).await;
        assert!(matches!(bad_id, Err(AppError::ValidationError(_))));

        let unknown = service
            .create(&author, request(Some("x"), Some(ObjectId::new().to_hex())))
            .await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        assert!(matches!(
            service.list_for_post(&ObjectId::new()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
