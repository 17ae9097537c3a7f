//! 여러 리소스 응답이 공유하는 DTO

use serde::{Deserialize, Serialize};
use crate::domain::dto::users::response::UserResponse;

/// 다른 문서가 참조하는 사용자
///
/// 작성자 정보를 채워 넣은 경우 사용자 객체로, 그렇지 않으면 ID 문자열로 직렬화됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Populated(UserResponse),
    Id(String),
}

/// 목록 조회의 페이지 정보
///
/// `lastPage = ceil(total / perPage)`이며 커서 기반 일관성은 보장하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl PageInfo {
    pub fn new(current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = if per_page == 0 { 0 } else { total.div_ceil(per_page) };

        Self {
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

/// 본문 없이 메시지만 돌려주는 응답
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub successful: bool,
}

impl MessageResponse {
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            successful: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_rounds_up() {
        assert_eq!(PageInfo::new(1, 10, 0).last_page, 0);
        assert_eq!(PageInfo::new(1, 10, 10).last_page, 1);
        assert_eq!(PageInfo::new(1, 10, 11).last_page, 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(PageInfo::new(2, 5, 12)).unwrap();
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["lastPage"], 3);
        assert_eq!(value["perPage"], 5);
        assert_eq!(value["total"], 12);
    }
}
