//! 회원가입 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::models::auth::role::Role;

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// `name`, `email`, `password`는 필수입니다. `role`이 없으면 `user`로 가입됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(required, email)]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,

    pub role: Option<Role>,

    #[validate(length(max = 2048))]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SignupRequest {
        SignupRequest {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            password: Some("secret".to_string()),
            role: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_fail() {
        let mut request = valid();
        request.password = None;
        assert!(request.validate().is_err());

        let mut request = valid();
        request.name = Some(String::new());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_email_fails() {
        let mut request = valid();
        request.email = Some("not-an-email".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_and_role() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@b.io","password":"x","role":"admin","photoUrl":"https://x.io/a.png"}"#,
        )
        .unwrap();

        assert_eq!(request.role, Some(Role::Admin));
        assert_eq!(request.photo_url.as_deref(), Some("https://x.io/a.png"));
    }
}
