//! # 인메모리 문서 저장소
//!
//! [`DocumentStore`] 계약을 프로세스 메모리에서 구현합니다.
//! 테스트와 MongoDB 없이 띄우는 로컬 실행에 사용됩니다.
//!
//! 엔티티는 BSON 문서로 직렬화되어 보관되며, 필터는 서비스 계층이 실제로 사용하는
//! MongoDB 쿼리 연산자만 해석합니다.
//!
//! | 필터 | 의미 |
//! |------|------|
//! | `{ field: value }` | 값이 같거나, 배열 필드가 값을 포함 |
//! | `{ field: /re/i }` | 정규식 일치 (배열이면 원소 중 하나) |
//! | `{ field: { $in: [..] } }` | 후보 중 하나와 일치 (정규식 후보 허용) |
//! | `{ field: { $ne: v } }` | 값이 다름 |
//! | `{ field: { $regex: p, $options: o } }` | 정규식 일치 |
//! | `{ $or: [..] }`, `{ $and: [..] }` | 논리 조합 |

use std::marker::PhantomData;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use regex::RegexBuilder;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::Entity;
use crate::repositories::store::DocumentStore;

/// 인메모리 저장소
///
/// 저장 순서를 유지하며, 최신순 조회는 저장 역순으로 처리합니다.
pub struct MemoryStore<T: Entity> {
    documents: RwLock<Vec<Document>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            _entity: PhantomData,
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Document>>> {
        self.documents
            .read()
            .map_err(|_| AppError::InternalError(format!("{} 저장소 잠금 실패", T::COLLECTION)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Document>>> {
        self.documents
            .write()
            .map_err(|_| AppError::InternalError(format!("{} 저장소 잠금 실패", T::COLLECTION)))
    }

    fn encode(entity: &T) -> AppResult<Document> {
        bson::to_document(entity).map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    fn decode(document: &Document) -> AppResult<T> {
        bson::from_document(document.clone()).map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MemoryStore<T> {
    async fn find_one(&self, filter: Document) -> AppResult<Option<T>> {
        let documents = self.read()?;

        documents
            .iter()
            .find(|document| matches_filter(document, &filter))
            .map(Self::decode)
            .transpose()
    }

    async fn find(&self, filter: Document) -> AppResult<Vec<T>> {
        let documents = self.read()?;

        documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .map(Self::decode)
            .collect()
    }

    async fn find_page(&self, filter: Document, skip: u64, limit: u64) -> AppResult<Vec<T>> {
        let documents = self.read()?;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        documents
            .iter()
            .rev()
            .filter(|document| matches_filter(document, &filter))
            .skip(skip)
            .take(limit)
            .map(Self::decode)
            .collect()
    }

    async fn create(&self, mut entity: T) -> AppResult<T> {
        if entity.id().is_none() {
            entity.assign_id(ObjectId::new());
        }
        let document = Self::encode(&entity)?;

        let mut documents = self.write()?;
        if documents.iter().any(|existing| existing.get("_id") == document.get("_id")) {
            return Err(AppError::ConflictError(format!("{} 문서가 이미 존재합니다", T::COLLECTION)));
        }
        documents.push(document);

        Ok(entity)
    }

    async fn save(&self, mut entity: T) -> AppResult<T> {
        let id = entity.id().ok_or_else(|| {
            AppError::InternalError(format!("저장되지 않은 {} 문서는 교체할 수 없습니다", T::COLLECTION))
        })?;
        entity.touch();
        let document = Self::encode(&entity)?;

        let mut documents = self.write()?;
        let slot = documents
            .iter_mut()
            .find(|existing| existing.get_object_id("_id").ok() == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("{} 문서를 찾을 수 없습니다", T::COLLECTION)))?;
        *slot = document;

        Ok(entity)
    }

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<T>> {
        let mut documents = self.write()?;

        match documents.iter().position(|document| matches_filter(document, &filter)) {
            Some(index) => {
                let removed = documents.remove(index);
                Self::decode(&removed).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn count_documents(&self, filter: Document) -> AppResult<u64> {
        let documents = self.read()?;
        let count = documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .count();

        Ok(count as u64)
    }
}

/// 문서가 필터와 일치하는지 판정합니다.
pub fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| match key.as_str() {
        "$or" => sub_filters(condition).any(|sub| matches_filter(document, sub)),
        "$and" => sub_filters(condition).all(|sub| matches_filter(document, sub)),
        field => field_matches(document.get(field), condition),
    })
}

fn sub_filters(condition: &Bson) -> impl Iterator<Item = &Document> {
    let branches: &[Bson] = match condition {
        Bson::Array(branches) => branches,
        _ => &[],
    };
    branches.iter().filter_map(|branch| branch.as_document())
}

fn field_matches(value: Option<&Bson>, condition: &Bson) -> bool {
    match condition {
        Bson::Document(operators) if is_operator_document(operators) => {
            operators_match(value, operators)
        }
        _ => value_matches(value, condition),
    }
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn operators_match(value: Option<&Bson>, operators: &Document) -> bool {
    operators.iter().all(|(operator, argument)| match operator.as_str() {
        "$in" => match argument {
            Bson::Array(candidates) => candidates.iter().any(|candidate| value_matches(value, candidate)),
            _ => false,
        },
        "$ne" => !value_matches(value, argument),
        "$exists" => argument.as_bool().unwrap_or(true) == value.is_some(),
        "$regex" => {
            let options = operators.get_str("$options").unwrap_or_default();
            argument
                .as_str()
                .is_some_and(|pattern| regex_matches(value, pattern, options))
        }
        "$options" => true,
        _ => false,
    })
}

/// 단일 값 조건. 배열 필드는 원소 중 하나라도 일치하면 참입니다.
fn value_matches(value: Option<&Bson>, expected: &Bson) -> bool {
    match expected {
        Bson::RegularExpression(regex) => regex_matches(value, &regex.pattern, &regex.options),
        _ => match value {
            Some(Bson::Array(items)) => {
                items.iter().any(|item| item == expected) || matches!(value, Some(v) if v == expected)
            }
            Some(actual) => actual == expected,
            None => matches!(expected, Bson::Null),
        },
    }
}

fn regex_matches(value: Option<&Bson>, pattern: &str, options: &str) -> bool {
    let Ok(regex) = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .dot_matches_new_line(options.contains('s'))
        .build()
    else {
        return false;
    };

    match value {
        Some(Bson::String(text)) => regex.is_match(text),
        Some(Bson::Array(items)) => items
            .iter()
            .any(|item| item.as_str().is_some_and(|text| regex.is_match(text))),
        _ => false,
    }
}

/// 동시 요청에 밀린 쓰기를 흉내 내는 테스트용 저장소
///
/// 첫 `find_one`은 다른 요청이 아직 저장하기 전처럼 비어 있는 결과를 주고,
/// `create`는 항상 고유 인덱스 위반으로 실패합니다. 그 뒤의 조회는 내부 저장소를 그대로 읽습니다.
#[cfg(test)]
pub(crate) struct LostRaceStore<T: Entity> {
    inner: MemoryStore<T>,
    stale_reads: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl<T: Entity> LostRaceStore<T> {
    /// `inner`에는 경쟁에서 이긴 요청이 저장한 문서가 들어 있어야 합니다.
    pub(crate) fn new(inner: MemoryStore<T>) -> Self {
        Self {
            inner,
            stale_reads: std::sync::atomic::AtomicUsize::new(1),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl<T: Entity> DocumentStore<T> for LostRaceStore<T> {
    async fn find_one(&self, filter: Document) -> AppResult<Option<T>> {
        use std::sync::atomic::Ordering;

        let stale = self
            .stale_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if stale {
            return Ok(None);
        }
        self.inner.find_one(filter).await
    }

    async fn find(&self, filter: Document) -> AppResult<Vec<T>> {
        self.inner.find(filter).await
    }

    async fn find_page(&self, filter: Document, skip: u64, limit: u64) -> AppResult<Vec<T>> {
        self.inner.find_page(filter, skip, limit).await
    }

    async fn create(&self, _entity: T) -> AppResult<T> {
        Err(AppError::ConflictError(format!("{} 문서가 이미 존재합니다", T::COLLECTION)))
    }

    async fn save(&self, entity: T) -> AppResult<T> {
        self.inner.save(entity).await
    }

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<T>> {
        self.inner.find_one_and_delete(filter).await
    }

    async fn count_documents(&self, filter: Document) -> AppResult<u64> {
        self.inner.count_documents(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Regex};
    use crate::domain::entities::Post;

    fn post(author: ObjectId, title: &str, tags: &[&str]) -> Post {
        Post::new(
            author,
            title.to_string(),
            format!("{} body", title),
            tags.iter().map(|tag| tag.to_string()).collect(),
            None,
        )
    }

    fn insensitive(pattern: &str) -> Bson {
        Bson::RegularExpression(Regex {
            pattern: regex::escape(pattern),
            options: "i".to_string(),
        })
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_find_by_id() {
        let store = MemoryStore::<Post>::new();
        let created = store.create(post(ObjectId::new(), "Hello", &[])).await.unwrap();

        let id = created.id.unwrap();
        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title, "Hello");
    }

    #[actix_web::test]
    async fn test_equality_and_array_contains() {
        let store = MemoryStore::<Post>::new();
        let author = ObjectId::new();
        store.create(post(author, "One", &["rust", "web"])).await.unwrap();
        store.create(post(ObjectId::new(), "Two", &["go"])).await.unwrap();

        assert_eq!(store.find(doc! { "user": author }).await.unwrap().len(), 1);
        assert_eq!(store.count_documents(doc! { "tags": "rust" }).await.unwrap(), 1);
        assert_eq!(store.count_documents(doc! {}).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_or_with_case_insensitive_regex() {
        let store = MemoryStore::<Post>::new();
        store.create(post(ObjectId::new(), "Learning RUST", &[])).await.unwrap();
        store.create(post(ObjectId::new(), "Cooking", &[])).await.unwrap();

        let filter = doc! {
            "$or": [
                { "title": insensitive("rust") },
                { "content": insensitive("rust") },
            ]
        };
        let found = store.find(filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Learning RUST");
    }

    #[actix_web::test]
    async fn test_in_with_regex_candidate_on_array_field() {
        let store = MemoryStore::<Post>::new();
        store.create(post(ObjectId::new(), "A", &["Rustacean"])).await.unwrap();
        store.create(post(ObjectId::new(), "B", &["python"])).await.unwrap();

        let filter = doc! { "tags": { "$in": [insensitive("rust")] } };
        assert_eq!(store.count_documents(filter).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_escaped_regex_is_literal() {
        let store = MemoryStore::<Post>::new();
        store.create(post(ObjectId::new(), "a+b", &[])).await.unwrap();
        store.create(post(ObjectId::new(), "aab", &[])).await.unwrap();

        let found = store.find(doc! { "title": insensitive("a+b") }).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "a+b");
    }

    #[actix_web::test]
    async fn test_find_page_is_newest_first() {
        let store = MemoryStore::<Post>::new();
        for title in ["first", "second", "third"] {
            store.create(post(ObjectId::new(), title, &[])).await.unwrap();
        }

        let page = store.find_page(doc! {}, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "second");
    }

    #[actix_web::test]
    async fn test_save_replaces_and_delete_removes() {
        let store = MemoryStore::<Post>::new();
        let mut created = store.create(post(ObjectId::new(), "Draft", &[])).await.unwrap();
        let id = created.id.unwrap();

        created.title = "Published".to_string();
        store.save(created).await.unwrap();
        assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().title, "Published");

        let removed = store.find_one_and_delete(doc! { "_id": id }).await.unwrap();
        assert!(removed.is_some());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(store.find_one_and_delete(doc! { "_id": id }).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_save_unknown_document_is_not_found() {
        let store = MemoryStore::<Post>::new();
        let mut orphan = post(ObjectId::new(), "Ghost", &[]);
        orphan.assign_id(ObjectId::new());

        assert!(matches!(store.save(orphan).await, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_ne_and_exists_operators() {
        let document = doc! { "title": "x", "count": 3 };

        assert!(matches_filter(&document, &doc! { "title": { "$ne": "y" } }));
        assert!(!matches_filter(&document, &doc! { "title": { "$ne": "x" } }));
        assert!(matches_filter(&document, &doc! { "count": { "$exists": true } }));
        assert!(matches_filter(&document, &doc! { "missing": { "$exists": false } }));
        assert!(matches_filter(&document, &doc! { "title": { "$regex": "X", "$options": "i" } }));
    }
}
