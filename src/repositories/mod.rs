//! # Repository Layer
//!
//! 도메인 엔티티별 데이터 액세스를 담당합니다.
//!
//! ```text
//! Services ──► XxxRepository ──► Arc<dyn DocumentStore<T>> ──► MongoStore | MemoryStore
//! ```
//!
//! 저장소 구현체 선택은 [`DataStores`]가 한 곳에서 결정하며,
//! 리포지토리와 서비스는 어떤 구현체가 주입되었는지 알지 못합니다.

pub mod store;
pub mod memory;
pub mod users;
pub mod posts;
pub mod comments;
pub mod networks;

use std::sync::Arc;
use log::info;
use mongodb::bson::doc;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::{Comment, Like, Network, Post, User};
use crate::repositories::memory::MemoryStore;
use crate::repositories::store::{DocumentStore, MongoStore};

pub use comments::comment_repo::CommentRepository;
pub use networks::network_repo::NetworkRepository;
pub use posts::like_repo::LikeRepository;
pub use posts::post_repo::{PostFilter, PostRepository};
pub use users::user_repo::UserRepository;

/// 컬렉션별 저장소 묶음
#[derive(Clone)]
pub struct DataStores {
    pub users: Arc<dyn DocumentStore<User>>,
    pub posts: Arc<dyn DocumentStore<Post>>,
    pub comments: Arc<dyn DocumentStore<Comment>>,
    pub likes: Arc<dyn DocumentStore<Like>>,
    pub networks: Arc<dyn DocumentStore<Network>>,
}

impl DataStores {
    /// MongoDB 컬렉션 기반 저장소
    pub fn mongo(database: &Database) -> Self {
        Self {
            users: Arc::new(MongoStore::<User>::new(database)),
            posts: Arc::new(MongoStore::<Post>::new(database)),
            comments: Arc::new(MongoStore::<Comment>::new(database)),
            likes: Arc::new(MongoStore::<Like>::new(database)),
            networks: Arc::new(MongoStore::<Network>::new(database)),
        }
    }

    /// 인메모리 저장소
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryStore::<User>::new()),
            posts: Arc::new(MemoryStore::<Post>::new()),
            comments: Arc::new(MemoryStore::<Comment>::new()),
            likes: Arc::new(MemoryStore::<Like>::new()),
            networks: Arc::new(MemoryStore::<Network>::new()),
        }
    }
}

/// MongoDB 인덱스를 생성합니다.
///
/// - `users.email` 유니크
/// - `likes.(user, post)` 유니크
/// - `networks.(follower, following)` 유니크
/// - `posts.createdAt`, `posts.user`, `comments.post` 조회용
pub async fn ensure_indexes(database: &Database) -> AppResult<()> {
    MongoStore::<User>::new(database)
        .ensure_index(doc! { "email": 1 }, "email_unique", true)
        .await?;

    let posts = MongoStore::<Post>::new(database);
    posts.ensure_index(doc! { "createdAt": -1 }, "created_at_desc", false).await?;
    posts.ensure_index(doc! { "user": 1 }, "user_asc", false).await?;

    MongoStore::<Comment>::new(database)
        .ensure_index(doc! { "post": 1 }, "post_asc", false)
        .await?;

    MongoStore::<Like>::new(database)
        .ensure_index(doc! { "user": 1, "post": 1 }, "user_post_unique", true)
        .await?;

    MongoStore::<Network>::new(database)
        .ensure_index(doc! { "follower": 1, "following": 1 }, "follower_following_unique", true)
        .await?;

    info!("✅ MongoDB 인덱스 확인 완료");
    Ok(())
}
