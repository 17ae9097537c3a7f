//! # 게시물 리포지토리
//!
//! `posts` 컬렉션 접근과 목록 검색 필터 구성을 담당합니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document, Regex};
use crate::core::errors::AppResult;
use crate::domain::entities::Post;
use crate::repositories::store::DocumentStore;

/// 목록 검색 조건
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// 작성자
    pub author: Option<ObjectId>,
    /// 제목 또는 본문 검색어
    pub query: Option<String>,
    /// 태그 검색어
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn by_author(author: ObjectId) -> Self {
        Self {
            author: Some(author),
            ..Default::default()
        }
    }

    /// MongoDB 쿼리 문서로 변환합니다.
    ///
    /// 검색어는 정규식 메타문자를 이스케이프한 뒤 대소문자 무시 부분 일치로 검색합니다.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(author) = self.author {
            filter.insert("user", author);
        }

        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            filter.insert("$or", vec![
                Bson::Document(doc! { "title": contains_ignore_case(query) }),
                Bson::Document(doc! { "content": contains_ignore_case(query) }),
            ]);
        }

        if let Some(tag) = self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            filter.insert("tags", doc! { "$in": [contains_ignore_case(tag)] });
        }

        filter
    }
}

fn contains_ignore_case(term: &str) -> Bson {
    Bson::RegularExpression(Regex {
        pattern: regex::escape(term),
        options: "i".to_string(),
    })
}

#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn DocumentStore<Post>>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn DocumentStore<Post>>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Post>> {
        self.store.find_by_id(id).await
    }

    /// 조건에 맞는 게시물 한 페이지와 전체 개수를 함께 반환합니다.
    pub async fn find_page(&self, filter: &PostFilter, skip: u64, limit: u64) -> AppResult<(Vec<Post>, u64)> {
        let query = filter.to_document();
        let posts = self.store.find_page(query.clone(), skip, limit).await?;
        let total = self.store.count_documents(query).await?;

        Ok((posts, total))
    }

    pub async fn find_by_author(&self, author: &ObjectId) -> AppResult<Vec<Post>> {
        self.store.find(doc! { "user": *author }).await
    }

    pub async fn create(&self, post: Post) -> AppResult<Post> {
        self.store.create(post).await
    }

    pub async fn save(&self, post: Post) -> AppResult<Post> {
        self.store.save(post).await
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<Option<Post>> {
        self.store.find_one_and_delete(doc! { "_id": *id }).await
    }
}
