//! # 문서 저장소 추상화
//!
//! 리포지토리가 의존하는 최소한의 저장소 계약입니다.
//! 키 기반 조회와 필터 조회만 사용하며, 여러 문서에 걸친 트랜잭션은 가정하지 않습니다.
//!
//! ## 구현체
//!
//! | 구현체 | 용도 |
//! |--------|------|
//! | [`MongoStore`] | 운영 환경, MongoDB 컬렉션 |
//! | [`MemoryStore`](super::memory::MemoryStore) | 테스트, DB 없는 로컬 실행 |
//!
//! 필터는 MongoDB 쿼리 문서(`bson::Document`)를 그대로 사용합니다.
//!
//! ```rust,ignore
//! let store: Arc<dyn DocumentStore<User>> = Arc::new(MongoStore::new(&database));
//! let user = store.find_one(doc! { "email": "jane@example.com" }).await?;
//! ```

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::Entity;

/// 최신 문서가 먼저 오도록 하는 정렬 조건
pub fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

/// 엔티티 타입별 문서 저장소
#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync {
    /// `_id`로 단건 조회
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<T>> {
        self.find_one(doc! { "_id": *id }).await
    }

    /// 필터와 일치하는 첫 문서
    async fn find_one(&self, filter: Document) -> AppResult<Option<T>>;

    /// 필터와 일치하는 모든 문서 (저장 순서)
    async fn find(&self, filter: Document) -> AppResult<Vec<T>>;

    /// 필터와 일치하는 문서를 최신순으로 `skip`개 건너뛰고 최대 `limit`개 조회
    async fn find_page(&self, filter: Document, skip: u64, limit: u64) -> AppResult<Vec<T>>;

    /// 새 문서를 저장합니다. `_id`가 없으면 새로 할당합니다.
    async fn create(&self, entity: T) -> AppResult<T>;

    /// 기존 문서를 통째로 교체합니다. `updatedAt`이 갱신됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 같은 `_id`의 문서가 없는 경우
    async fn save(&self, entity: T) -> AppResult<T>;

    /// 필터와 일치하는 첫 문서를 삭제하고 삭제된 문서를 반환
    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<T>>;

    /// 필터와 일치하는 문서 수
    async fn count_documents(&self, filter: Document) -> AppResult<u64>;
}

/// MongoDB 컬렉션 기반 저장소
pub struct MongoStore<T: Entity> {
    collection: Collection<T>,
}

impl<T: Entity> MongoStore<T> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<T>(T::COLLECTION),
        }
    }

    /// 인덱스를 생성합니다. 이미 같은 이름의 인덱스가 있으면 아무 일도 하지 않습니다.
    pub async fn ensure_index(&self, keys: Document, name: &str, unique: bool) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder()
                .unique(unique)
                .name(name.to_string())
                .build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MongoStore<T> {
    async fn find_one(&self, filter: Document) -> AppResult<Option<T>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find(&self, filter: Document) -> AppResult<Vec<T>> {
        let cursor = self.collection
            .find(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_page(&self, filter: Document, skip: u64, limit: u64) -> AppResult<Vec<T>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let cursor = self.collection
            .find(filter)
            .sort(newest_first())
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut entity: T) -> AppResult<T> {
        if entity.id().is_none() {
            entity.assign_id(ObjectId::new());
        }

        self.collection
            .insert_one(&entity)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("{} 문서가 이미 존재합니다", T::COLLECTION))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        Ok(entity)
    }

    async fn save(&self, mut entity: T) -> AppResult<T> {
        let id = entity.id().ok_or_else(|| {
            AppError::InternalError(format!("저장되지 않은 {} 문서는 교체할 수 없습니다", T::COLLECTION))
        })?;
        entity.touch();

        let result = self.collection
            .replace_one(doc! { "_id": id }, &entity)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("{} 문서가 이미 존재합니다", T::COLLECTION))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("{} 문서를 찾을 수 없습니다", T::COLLECTION)));
        }

        Ok(entity)
    }

    async fn find_one_and_delete(&self, filter: Document) -> AppResult<Option<T>> {
        self.collection
            .find_one_and_delete(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn count_documents(&self, filter: Document) -> AppResult<u64> {
        self.collection
            .count_documents(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
