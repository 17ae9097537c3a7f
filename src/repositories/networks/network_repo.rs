use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Network;
use crate::repositories::store::DocumentStore;

/// 팔로우 관계 리포지토리 (`networks` 컬렉션)
#[derive(Clone)]
pub struct NetworkRepository {
    store: Arc<dyn DocumentStore<Network>>,
}

impl NetworkRepository {
    pub fn new(store: Arc<dyn DocumentStore<Network>>) -> Self {
        Self { store }
    }

    pub async fn find_pair(&self, follower: &ObjectId, following: &ObjectId) -> AppResult<Option<Network>> {
        self.store
            .find_one(doc! { "follower": *follower, "following": *following })
            .await
    }

    pub async fn create(&self, network: Network) -> AppResult<Network> {
        self.store.create(network).await
    }

    /// 팔로우 관계를 찾고, 없으면 새로 만듭니다. 새로 만들었으면 `true`를 함께 반환합니다.
    ///
    /// 동시에 들어온 같은 팔로우가 `follower_following_unique` 인덱스에 막히면
    /// 먼저 저장된 관계를 돌려줍니다.
    pub async fn find_or_create(&self, follower: &ObjectId, following: &ObjectId) -> AppResult<(Network, bool)> {
        if let Some(existing) = self.find_pair(follower, following).await? {
            return Ok((existing, false));
        }

        match self.create(Network::new(*follower, *following)).await {
            Ok(created) => Ok((created, true)),
            Err(AppError::ConflictError(reason)) => self
                .find_pair(follower, following)
                .await?
                .map(|existing| (existing, false))
                .ok_or(AppError::ConflictError(reason)),
            Err(e) => Err(e),
        }
    }

    /// `user`를 팔로우하는 관계들
    pub async fn followers_of(&self, user: &ObjectId) -> AppResult<Vec<Network>> {
        self.store.find(doc! { "following": *user }).await
    }

    /// `user`가 팔로우하는 관계들
    pub async fn followings_of(&self, user: &ObjectId) -> AppResult<Vec<Network>> {
        self.store.find(doc! { "follower": *user }).await
    }
}
