//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 데이터 액세스를 담당합니다.
//! 저장소 구현체(MongoDB 또는 인메모리)는 생성 시점에 주입됩니다.
//!
//! ## 인덱스
//!
//! - `email_unique`: 이메일 유니크 인덱스 (MongoDB 전용, [`ensure_indexes`](crate::repositories::ensure_indexes))

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use crate::core::errors::AppResult;
use crate::domain::entities::User;
use crate::repositories::store::DocumentStore;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(Arc::new(MemoryStore::<User>::new()));
/// let created = repo.create(user).await?;
/// let found = repo.find_by_email("jane@example.com").await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore<User>>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore<User>>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.store.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.store.find_one(doc! { "email": email }).await
    }

    /// 여러 사용자를 한 번에 조회하여 ID별로 묶습니다.
    ///
    /// 게시물/댓글 목록에 작성자 정보를 채울 때 사용합니다.
    pub async fn find_many_by_ids(&self, ids: &[ObjectId]) -> AppResult<HashMap<ObjectId, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = self.store.find(doc! { "_id": { "$in": ids.to_vec() } }).await?;

        Ok(users
            .into_iter()
            .filter_map(|user| user.id.map(|id| (id, user)))
            .collect())
    }

    pub async fn create(&self, user: User) -> AppResult<User> {
        self.store.create(user).await
    }

    pub async fn save(&self, user: User) -> AppResult<User> {
        self.store.save(user).await
    }

    /// 사용자를 삭제하고 삭제된 레코드를 반환합니다.
    pub async fn delete(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.store.find_one_and_delete(doc! { "_id": *id }).await
    }
}
