//! 세션 해석기
//!
//! Authorization 헤더 값 하나를 받아 현재 저장소에 존재하는 사용자로 바꿉니다.
//!
//! ```text
//! header ──► strip_credential ──► TokenService::parse ──► ObjectId ──► users.find_by_id
//!   │              │                      │                   │              │
//!   ▼              ▼                      ▼                   ▼              ▼
//! Missing       Missing            InvalidCredential   InvalidCredential SubjectNotFound
//!                                                                        StoreUnavailable
//! ```
//!
//! 호출당 저장소 조회는 정확히 한 번이며, 해석 결과를 캐시하지 않습니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;
use crate::core::errors::AppError;
use crate::domain::entities::User;
use crate::repositories::UserRepository;
use crate::services::auth::token_service::{TokenError, TokenService};

/// 클라이언트에 보내는 인증 실패 메시지
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue";
/// 클라이언트에 보내는 역할 거부 메시지
pub const ROLE_FORBIDDEN_MESSAGE: &str = "You are not allowed to access this path";
/// 토큰은 유효하지만 사용자가 없을 때의 메시지
pub const SUBJECT_NOT_FOUND_MESSAGE: &str = "User not found";

/// 접근 거부 사유
#[derive(Debug, Error)]
pub enum AuthRejection {
    /// Authorization 헤더가 없거나 비어 있음
    #[error("missing credential")]
    MissingCredential,
    /// 토큰 형식/서명/만료 검사 실패
    #[error("invalid credential: {0}")]
    InvalidCredential(TokenError),
    /// 토큰의 사용자가 저장소에 없음 (발급 후 삭제됨)
    #[error("subject not found")]
    SubjectNotFound,
    /// 사용자 조회 중 저장소 오류
    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),
    /// 현재 역할이 라우트 허용 목록에 없음
    #[error("role not allowed")]
    RoleNotAllowed,
}

/// 거부 사유를 HTTP 응답용 에러로 변환합니다.
///
/// | 사유 | 응답 |
/// |------|------|
/// | `RoleNotAllowed` | 404 `You are not allowed to access this path` |
/// | `SubjectNotFound` | 404 `User not found` |
/// | 그 외 (저장소 오류 포함) | 403 `Please login to continue` |
impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::RoleNotAllowed => AppError::AuthorizationError(ROLE_FORBIDDEN_MESSAGE.to_string()),
            AuthRejection::SubjectNotFound => AppError::NotFound(SUBJECT_NOT_FOUND_MESSAGE.to_string()),
            _ => AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()),
        }
    }
}

/// 세션 해석기
///
/// [`TokenService`]와 사용자 리포지토리를 생성 시점에 받아 보관합니다.
#[derive(Clone)]
pub struct SessionResolver {
    tokens: Arc<TokenService>,
    users: UserRepository,
}

impl SessionResolver {
    pub fn new(tokens: Arc<TokenService>, users: UserRepository) -> Self {
        Self { tokens, users }
    }

    /// Authorization 헤더 값을 사용자 레코드로 해석합니다.
    ///
    /// # Errors
    ///
    /// * `MissingCredential` - 헤더 없음
    /// * `InvalidCredential` - 토큰 검증 실패, 또는 사용자 ID가 ObjectId가 아님
    /// * `SubjectNotFound` - 사용자가 없음
    /// * `StoreUnavailable` - 저장소 조회 실패
    pub async fn resolve(&self, header_value: Option<&str>) -> Result<User, AuthRejection> {
        let token = header_value
            .and_then(TokenService::strip_credential)
            .ok_or(AuthRejection::MissingCredential)?;

        let claims = self.tokens
            .parse(token)
            .map_err(AuthRejection::InvalidCredential)?;

        let subject_id = ObjectId::parse_str(&claims.user_id)
            .map_err(|_| AuthRejection::InvalidCredential(TokenError::Malformed))?;

        match self.users.find_by_id(&subject_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AuthRejection::SubjectNotFound),
            Err(e) => Err(AuthRejection::StoreUnavailable(e.to_string())),
        }
    }
}
