use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use crate::core::errors::AppResult;
use crate::domain::entities::Comment;
use crate::repositories::store::DocumentStore;

/// 댓글 리포지토리 (`comments` 컬렉션)
#[derive(Clone)]
pub struct CommentRepository {
    store: Arc<dyn DocumentStore<Comment>>,
}

impl CommentRepository {
    pub fn new(store: Arc<dyn DocumentStore<Comment>>) -> Self {
        Self { store }
    }

    pub async fn create(&self, comment: Comment) -> AppResult<Comment> {
        self.store.create(comment).await
    }

    /// 게시물의 댓글을 작성 순서대로 조회
    pub async fn find_by_post(&self, post: &ObjectId) -> AppResult<Vec<Comment>> {
        self.store.find(doc! { "post": *post }).await
    }
}
