//! # 게시물 서비스 구현
//!
//! 게시물 작성, 목록/검색, 수정, 삭제와 좋아요/좋아요 취소를 담당합니다.
//!
//! ## 권한 규칙
//!
//! | 작업 | 허용 대상 |
//! |------|-----------|
//! | 수정 | 작성자 |
//! | 삭제 | 작성자 또는 관리자 |
//! | 좋아요 취소 | 좋아요를 누른 사용자 |
//!
//! 목록은 최신순이며 작성자 정보가 채워진 상태로 반환됩니다.

use log::info;
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::common::{MessageResponse, PageInfo};
use crate::domain::dto::posts::request::{CreatePostRequest, PostListQuery, UpdatePostRequest};
use crate::domain::dto::posts::response::{LikeEnvelope, PostEnvelope, PostListResponse, PostResponse};
use crate::domain::entities::{Entity, Post};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::{LikeRepository, PostFilter, PostRepository, UserRepository};
use crate::utils::string_utils::{clean_optional_string, required_field};

const POST_INVALID: &str = "Provide valid title and content";
const POST_NOT_FOUND: &str = "Post not found";
const NOT_POST_OWNER: &str = "You can't modify other's post";

/// 게시물 비즈니스 로직 서비스
#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    likes: LikeRepository,
    users: UserRepository,
}

impl PostService {
    pub fn new(posts: PostRepository, likes: LikeRepository, users: UserRepository) -> Self {
        Self { posts, likes, users }
    }

    /// 게시물 작성
    ///
    /// 빈 태그는 버립니다.
    pub async fn create(&self, author: &ObjectId, request: CreatePostRequest) -> AppResult<PostEnvelope> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(POST_INVALID.to_string()))?;

        let title = required_field(request.title, POST_INVALID)?;
        let content = required_field(request.content, POST_INVALID)?;

        let post = Post::new(
            *author,
            title,
            content,
            clean_tags(request.tags),
            clean_optional_string(request.media_url),
        );

        let created = self.posts.create(post).await?;
        info!("📝 게시물 작성: {} (작성자 {})", created.id_hex(), author.to_hex());

        Ok(PostEnvelope::new(PostResponse::from(created), "Post created"))
    }

    /// 게시물 목록 (검색어/태그 필터, 페이지네이션)
    pub async fn list(&self, query: PostListQuery) -> AppResult<PostListResponse> {
        let filter = PostFilter {
            author: None,
            query: query.query.clone(),
            tag: query.tag.clone(),
        };

        self.page(&filter, &query).await
    }

    /// 특정 사용자가 작성한 게시물 목록
    pub async fn list_for_user(&self, author: &ObjectId, query: PostListQuery) -> AppResult<PostListResponse> {
        self.page(&PostFilter::by_author(*author), &query).await
    }

    /// 게시물 수정 (작성자만)
    pub async fn update(
        &self,
        actor: &ObjectId,
        post_id: &ObjectId,
        request: UpdatePostRequest,
    ) -> AppResult<PostEnvelope> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(POST_INVALID.to_string()))?;

        let mut post = self.find_post(post_id).await?;
        if !post.is_authored_by(actor) {
            return Err(AppError::OwnershipError(NOT_POST_OWNER.to_string()));
        }

        if let Some(title) = clean_optional_string(request.title) {
            post.title = title;
        }
        if let Some(content) = clean_optional_string(request.content) {
            post.content = content;
        }
        if let Some(tags) = request.tags {
            post.tags = clean_tags(tags);
        }
        if let Some(media_url) = clean_optional_string(request.media_url) {
            post.media_url = Some(media_url);
        }

        let saved = self.posts.save(post).await?;
        Ok(PostEnvelope::new(PostResponse::from(saved), "Post updated successfully"))
    }

    /// 게시물 삭제 (작성자 또는 관리자)
    pub async fn delete(&self, actor: &AuthenticatedUser, post_id: &ObjectId) -> AppResult<PostEnvelope> {
        let post = self.find_post(post_id).await?;
        if !post.is_authored_by(&actor.id()) && !actor.is_admin() {
            return Err(AppError::OwnershipError(NOT_POST_OWNER.to_string()));
        }

        let deleted = self
            .posts
            .delete(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        info!("🗑️ 게시물 삭제: {} (요청자 {})", post_id.to_hex(), actor.id().to_hex());
        Ok(PostEnvelope::new(PostResponse::from(deleted), "Post deleted successfully"))
    }

    /// 좋아요
    ///
    /// 같은 사용자가 같은 게시물에 다시 누르면 기존 좋아요를 돌려줍니다.
    pub async fn like(&self, user: &ObjectId, post_id: &ObjectId) -> AppResult<LikeEnvelope> {
        self.find_post(post_id).await?;

        let like = self.likes.find_or_create(user, post_id).await?;

        Ok(LikeEnvelope::new(like, "Liked"))
    }

    /// 좋아요 취소
    ///
    /// `like_id`는 게시물 ID가 아니라 좋아요 문서의 ID입니다.
    pub async fn unlike(&self, user: &ObjectId, like_id: &ObjectId) -> AppResult<MessageResponse> {
        let like = self
            .likes
            .find_by_id(like_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Like not found".to_string()))?;

        if like.user != *user {
            return Err(AppError::OwnershipError("You can't remove other's like".to_string()));
        }

        self.likes.delete(like_id).await?;
        Ok(MessageResponse::success("Unliked"))
    }

    async fn find_post(&self, post_id: &ObjectId) -> AppResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }

    async fn page(&self, filter: &PostFilter, query: &PostListQuery) -> AppResult<PostListResponse> {
        query
            .validate()
            .map_err(|_| AppError::ValidationError("Invalid pagination parameters".to_string()))?;

        let page = query.page();
        let per_page = query.per_page();
        let skip = page.saturating_sub(1).saturating_mul(per_page);

        let (posts, total) = self.posts.find_page(filter, skip, per_page).await?;

        let mut author_ids: Vec<ObjectId> = posts.iter().map(|post| post.user).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors = self.users.find_many_by_ids(&author_ids).await?;

        let posts = posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.user).cloned();
                PostResponse::with_author(post, author)
            })
            .collect();

        Ok(PostListResponse {
            page_info: PageInfo::new(page, per_page, total),
            posts,
            successful: true,
        })
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|tag| clean_optional_string(Some(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::common::UserRef;
    use crate::domain::entities::User;
    use crate::domain::models::auth::role::Role;
    use std::sync::Arc;
    use crate::domain::entities::Like;
    use crate::repositories::memory::{LostRaceStore, MemoryStore};
    use crate::repositories::store::DocumentStore;
    use crate::repositories::DataStores;

    struct Fixture {
        service: PostService,
        users: UserRepository,
    }

    fn fixture() -> Fixture {
        let stores = DataStores::memory();
        let users = UserRepository::new(stores.users.clone());
        let service = PostService::new(
            PostRepository::new(stores.posts.clone()),
            LikeRepository::new(stores.likes.clone()),
            users.clone(),
        );

        Fixture { service, users }
    }

    async fn user(f: &Fixture, email: &str, role: Role) -> User {
        f.users
            .create(User::new("name".to_string(), email.to_string(), "hash".to_string(), role, None))
            .await
            .unwrap()
    }

    fn post_request(title: &str, content: &str, tags: &[&str]) -> CreatePostRequest {
        CreatePostRequest {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            media_url: None,
        }
    }

    async fn create(f: &Fixture, author: &User, title: &str, content: &str, tags: &[&str]) -> ObjectId {
        let envelope = f
            .service
            .create(&author.id.unwrap(), post_request(title, content, tags))
            .await
            .unwrap();
        ObjectId::parse_str(&envelope.post.id).unwrap()
    }

    #[actix_web::test]
    async fn test_create_requires_title_and_content() {
        let f = fixture();
        let author = user(&f, "a@example.com", Role::User).await;

        let result = f
            .service
            .create(&author.id.unwrap(), post_request("", "body", &[]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(ref m)) if m == POST_INVALID));
    }

    #[actix_web::test]
    async fn test_list_paginates_searches_and_populates_authors() {
        let f = fixture();
        let author = user(&f, "a@example.com", Role::User).await;

        for i in 0..12 {
            create(&f, &author, &format!("post {}", i), "hello", &["misc"]).await;
        }
        create(&f, &author, "Rust tips", "ownership", &["Rust"]).await;

        let first = f.service.list(PostListQuery::default()).await.unwrap();
        assert_eq!(first.page_info, PageInfo::new(1, 10, 13));
        assert_eq!(first.page_info.last_page, 2);
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.posts[0].title, "Rust tips");
        assert!(matches!(first.posts[0].user, UserRef::Populated(_)));

        let second = f
            .service
            .list(PostListQuery {
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.posts.len(), 3);

        let searched = f
            .service
            .list(PostListQuery {
                query: Some("RUST".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.page_info.total, 1);

        let tagged = f
            .service
            .list(PostListQuery {
                tag: Some("rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tagged.posts.len(), 1);
        assert_eq!(tagged.page_info.total, 1);
    }

    #[actix_web::test]
    async fn test_list_for_user_only_returns_their_posts() {
        let f = fixture();
        let a = user(&f, "a@example.com", Role::User).await;
        let b = user(&f, "b@example.com", Role::User).await;
        create(&f, &a, "a1", "c", &[]).await;
        create(&f, &b, "b1", "c", &[]).await;

        let listed = f
            .service
            .list_for_user(&a.id.unwrap(), PostListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.page_info.total, 1);
        assert_eq!(listed.posts[0].title, "a1");
    }

    #[actix_web::test]
    async fn test_only_author_can_update() {
        let f = fixture();
        let author = user(&f, "a@example.com", Role::User).await;
        let other = user(&f, "b@example.com", Role::Admin).await;
        let post_id = create(&f, &author, "title", "content", &[]).await;

        let request = UpdatePostRequest {
            title: Some("changed".to_string()),
            ..Default::default()
        };

        let denied = f.service.update(&other.id.unwrap(), &post_id, request.clone()).await;
        assert!(matches!(denied, Err(AppError::OwnershipError(_))));

        let updated = f.service.update(&author.id.unwrap(), &post_id, request).await.unwrap();
        assert_eq!(updated.post.title, "changed");
        assert_eq!(updated.message, "Post updated successfully");

        let missing = f
            .service
            .update(&author.id.unwrap(), &ObjectId::new(), UpdatePostRequest::default())
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_author_or_admin_can_delete() {
        let f = fixture();
        let author = user(&f, "a@example.com", Role::User).await;
        let stranger = user(&f, "b@example.com", Role::User).await;
        let admin = user(&f, "c@example.com", Role::Admin).await;

        let first = create(&f, &author, "one", "c", &[]).await;
        let second = create(&f, &author, "two", "c", &[]).await;

        let stranger = AuthenticatedUser::from_user(stranger).unwrap();
        assert!(matches!(
            f.service.delete(&stranger, &first).await,
            Err(AppError::OwnershipError(_))
        ));

        let author = AuthenticatedUser::from_user(author).unwrap();
        assert!(f.service.delete(&author, &first).await.is_ok());

        let admin = AuthenticatedUser::from_user(admin).unwrap();
        let deleted = f.service.delete(&admin, &second).await.unwrap();
        assert_eq!(deleted.message, "Post deleted successfully");

        assert!(matches!(f.service.delete(&admin, &second).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_concurrent_like_returns_stored_like() {
        let stores = DataStores::memory();
        let users = UserRepository::new(stores.users.clone());
        let posts = PostRepository::new(stores.posts.clone());
        let fan = users
            .create(User::new("fan".to_string(), "fan@example.com".to_string(), "hash".to_string(), Role::User, None))
            .await
            .unwrap()
            .id
            .unwrap();
        let post_id = posts
            .create(Post::new(fan, "title".to_string(), "content".to_string(), vec![], None))
            .await
            .unwrap()
            .id
            .unwrap();

        // 다른 요청이 먼저 저장한 좋아요
        let likes = MemoryStore::<Like>::new();
        let stored = likes.create(Like::new(fan, post_id)).await.unwrap();
        let service = PostService::new(
            posts,
            LikeRepository::new(Arc::new(LostRaceStore::new(likes))),
            users,
        );

        let envelope = service.like(&fan, &post_id).await.unwrap();
        assert_eq!(envelope.like.id, stored.id_hex());
        assert_eq!(envelope.message, "Liked");
        assert!(envelope.successful);
    }

    #[actix_web::test]
    async fn test_like_is_idempotent_and_unlike_checks_owner() {
        let f = fixture();
        let author = user(&f, "a@example.com", Role::User).await;
        let fan = user(&f, "b@example.com", Role::User).await;
        let post_id = create(&f, &author, "title", "content", &[]).await;
        let fan_id = fan.id.unwrap();

        let first = f.service.like(&fan_id, &post_id).await.unwrap();
        let again = f.service.like(&fan_id, &post_id).await.unwrap();
        assert_eq!(first.like.id, again.like.id);
        assert_eq!(first.message, "Liked");

        let like_id = ObjectId::parse_str(&first.like.id).unwrap();
        assert!(matches!(
            f.service.unlike(&author.id.unwrap(), &like_id).await,
            Err(AppError::OwnershipError(_))
        ));

        assert_eq!(f.service.unlike(&fan_id, &like_id).await.unwrap().message, "Unliked");
        assert!(matches!(f.service.unlike(&fan_id, &like_id).await, Err(AppError::NotFound(_))));

        assert!(matches!(
            f.service.like(&fan_id, &ObjectId::new()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
