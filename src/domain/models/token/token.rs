//! JWT 클레임 구조체
//!
//! 로그인 시 발급되는 토큰의 페이로드입니다. 서명은 HS256, 유효 기간은 발급 시점부터 1일입니다.
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::role::Role;

/// 토큰 클레임
///
/// `role`은 발급 당시의 역할일 뿐이며, 접근 제어는 저장소의 현재 역할로 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰 주체(사용자) ID
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 발급 당시 역할
    pub role: Role,
    /// 발급 시각 (Unix seconds)
    pub iat: i64,
    /// 만료 시각 (Unix seconds)
    pub exp: i64,
}
