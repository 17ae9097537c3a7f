use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Like;
use crate::repositories::store::DocumentStore;

/// 좋아요 리포지토리 (`likes` 컬렉션)
#[derive(Clone)]
pub struct LikeRepository {
    store: Arc<dyn DocumentStore<Like>>,
}

impl LikeRepository {
    pub fn new(store: Arc<dyn DocumentStore<Like>>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Like>> {
        self.store.find_by_id(id).await
    }

    pub async fn find_by_user_and_post(&self, user: &ObjectId, post: &ObjectId) -> AppResult<Option<Like>> {
        self.store.find_one(doc! { "user": *user, "post": *post }).await
    }

    pub async fn create(&self, like: Like) -> AppResult<Like> {
        self.store.create(like).await
    }

    /// 사용자/게시물 쌍의 좋아요를 찾고, 없으면 새로 만듭니다.
    ///
    /// 같은 요청이 동시에 들어와 `user_post_unique` 인덱스에 막히면
    /// 먼저 저장된 좋아요를 다시 읽어 돌려줍니다.
    pub async fn find_or_create(&self, user: &ObjectId, post: &ObjectId) -> AppResult<Like> {
        if let Some(existing) = self.find_by_user_and_post(user, post).await? {
            return Ok(existing);
        }

        match self.create(Like::new(*user, *post)).await {
            Err(AppError::ConflictError(reason)) => self
                .find_by_user_and_post(user, post)
                .await?
                .ok_or(AppError::ConflictError(reason)),
            result => result,
        }
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<Option<Like>> {
        self.store.find_one_and_delete(doc! { "_id": *id }).await
    }
}
