//! # 문자열 유틸리티
//!
//! 요청 값 정리와 경로 ID 파싱에 쓰는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use crate::core::errors::{AppError, AppResult};

/// 필수 문자열 필드 검증 및 정리
///
/// 값이 없거나 공백뿐이면 주어진 메시지로 `ValidationError`를 반환하고,
/// 그렇지 않으면 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::required_field;
///
/// let title = required_field(request.title, "Provide valid title and content")?;
/// ```
pub fn required_field(value: Option<String>, message: &str) -> AppResult<String> {
    clean_optional_string(value).ok_or_else(|| AppError::ValidationError(message.to_string()))
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 경로 파라미터의 문자열 ID를 `ObjectId`로 변환
///
/// 24자리 16진수가 아니면 `ValidationError`입니다.
pub fn parse_object_id(raw: &str, field_name: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {}", field_name)))
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열은 None으로 바꿉니다.
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field() {
        assert_eq!(required_field(Some("  Hello ".to_string()), "msg").unwrap(), "Hello");

        for value in [None, Some(String::new()), Some("  \t".to_string())] {
            match required_field(value, "Provide valid credentials") {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Provide valid credentials"),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "post id").unwrap(), id);
        assert!(matches!(parse_object_id("123", "post id"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Query {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            tag: Option<String>,
        }

        let q: Query = serde_json::from_str(r#"{"tag": "  rust  "}"#).unwrap();
        assert_eq!(q.tag.as_deref(), Some("rust"));

        let q: Query = serde_json::from_str(r#"{"tag": "   "}"#).unwrap();
        assert_eq!(q.tag, None);

        let q: Query = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(q.tag, None);
    }
}
