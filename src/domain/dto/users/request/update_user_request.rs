use serde::{Deserialize, Serialize};
use validator::Validate;

/// 내 정보 수정 요청 DTO
///
/// 모든 필드가 선택입니다. 역할은 이 경로로 바꿀 수 없습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub password: Option<String>,

    #[validate(length(max = 2048))]
    pub photo_url: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none() && self.photo_url.is_none()
    }
}
