//! 게시물 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 게시물 작성 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(required, length(min = 1, max = 300))]
    pub title: Option<String>,

    #[validate(required, length(min = 1))]
    pub content: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(max = 2048))]
    pub media_url: Option<String>,
}

/// 게시물 부분 수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    pub tags: Option<Vec<String>>,

    #[validate(length(max = 2048))]
    pub media_url: Option<String>,
}

/// 게시물 목록 조회 쿼리
///
/// `GET /posts?query=rust&tag=news&page=2&perPage=20`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    /// 제목/본문 검색어 (대소문자 무시)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub query: Option<String>,

    /// 태그 검색어 (대소문자 무시)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tag: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
}

impl PostListQuery {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PER_PAGE: u64 = 10;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(Self::DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_requires_title_and_content() {
        let request = CreatePostRequest {
            title: Some("Hello".to_string()),
            content: None,
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = CreatePostRequest {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_list_query_defaults() {
        let query = PostListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_list_query_rejects_zero_page() {
        let query = PostListQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
