//! 저장소 엔티티
//!
//! 모든 엔티티는 `_id`(ObjectId)와 `createdAt`/`updatedAt` 타임스탬프를 가지며,
//! 필드명은 camelCase로 저장됩니다.

pub mod users;
pub mod posts;
pub mod comments;
pub mod networks;

use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use users::user::User;
pub use posts::post::Post;
pub use posts::like::Like;
pub use comments::comment::Comment;
pub use networks::network::Network;

/// 컬렉션에 저장되는 문서 타입
///
/// [`DocumentStore`](crate::repositories::store::DocumentStore) 구현체가
/// 컬렉션 이름과 ID/타임스탬프 관리를 위해 사용합니다.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// MongoDB 컬렉션 이름
    const COLLECTION: &'static str;

    fn id(&self) -> Option<ObjectId>;

    fn assign_id(&mut self, id: ObjectId);

    /// `updatedAt`을 현재 시각으로 갱신
    fn touch(&mut self);

    /// 16진수 문자열 ID. 아직 저장되지 않은 엔티티는 빈 문자열입니다.
    fn id_hex(&self) -> String {
        self.id().map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// 엔티티 타임스탬프를 RFC 3339 문자열로 변환합니다.
pub fn format_timestamp(value: mongodb::bson::DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}
