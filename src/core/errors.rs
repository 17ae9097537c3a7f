//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! 모든 계층이 [`AppError`]를 반환하고, Actix-Web의 `ResponseError` 구현을 통해
//! 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 응답 형식
//!
//! 모든 에러 응답은 다음 형식을 따릅니다.
//!
//! ```json
//! { "message": "User not found", "successful": false }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락, 잘못된 ID 형식 |
//! | `ConflictError` | 400 Bad Request | 이미 사용 중인 이메일 |
//! | `OwnershipError` | 400 Bad Request | 작성자/소유자가 아닌 사용자의 수정·삭제 |
//! | `NotFound` | 404 Not Found | 리소스 없음, 토큰의 사용자가 삭제됨 |
//! | `AuthenticationError` | 403 Forbidden | 토큰 없음, 위조, 만료 |
//! | `AuthorizationError` | 404 Not Found | 역할 허용 목록에 없는 사용자 |
//! | `DatabaseError` | 500 Internal Server Error | 저장소 오류 |
//! | `ConfigurationError` | 500 Internal Server Error | 설정 누락 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 인증/인가 실패의 상태 코드(403/404)는 기존 클라이언트와의 호환을 위해 유지합니다.
//! 5xx 에러는 상세 내용을 서버 로그에만 기록하고, 클라이언트에는 일반 메시지만 보냅니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_post(&self, id: &ObjectId) -> AppResult<Post> {
//!     self.posts
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 5xx 응답에 사용하는 일반 메시지
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong, please try again later";

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
/// 핸들러에서 `?`로 전파하면 HTTP 응답으로 자동 변환됩니다.
///
/// ## 에러 카테고리
///
/// ### 1. 인프라 계층
/// - `DatabaseError`: MongoDB 연산 실패
/// - `ConfigurationError`: 필수 설정 누락
///
/// ### 2. 비즈니스 계층
/// - `ValidationError`, `ConflictError`, `OwnershipError`, `NotFound`
///
/// ### 3. 보안 계층
/// - `AuthenticationError`: 신원을 확인할 수 없음
/// - `AuthorizationError`: 역할이 허용되지 않음
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// 연결 타임아웃, 쿼리 실패, 직렬화 실패 등 저장소 연산 중 발생하는 오류입니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러
    ///
    /// 필수 필드 누락, 잘못된 ObjectId, 파싱할 수 없는 JSON 본문 등에서 발생합니다.
    ///
    /// # 예제
    /// ```rust,ignore
    /// if title.trim().is_empty() {
    ///     return Err(AppError::ValidationError(
    ///         "Provide valid title and content".to_string()
    ///     ));
    /// }
    /// ```
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러
    ///
    /// 중복 이메일로 회원가입하거나 이메일을 이미 사용 중인 값으로 바꾸려 할 때 발생합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 리소스 소유권 에러
    ///
    /// 인증은 되었지만 해당 리소스의 작성자(또는 관리자)가 아닌 경우입니다.
    ///
    /// # 예제
    /// ```rust,ignore
    /// if post.user != current_user_id {
    ///     return Err(AppError::OwnershipError(
    ///         "You can't modify other's post".to_string()
    ///     ));
    /// }
    /// ```
    #[error("Ownership error: {0}")]
    OwnershipError(String),

    /// 인증 실패 에러
    ///
    /// 토큰이 없거나 형식이 잘못되었거나 서명/만료 검사에 실패한 경우입니다.
    /// 어느 검사에서 실패했는지는 응답에 드러나지 않습니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    ///
    /// 인증된 사용자의 현재 역할이 라우트의 허용 목록에 없는 경우입니다.
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 내부 서버 에러
    ///
    /// 비밀번호 해싱 실패, 토큰 서명 실패 등 예상하지 못한 오류입니다.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출할 메시지
    ///
    /// 4xx는 원본 메시지를 그대로, 5xx는 일반 메시지를 반환합니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::OwnershipError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            AppError::DatabaseError(_)
            | AppError::ConfigurationError(_)
            | AppError::InternalError(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::ConflictError(_)
            | AppError::OwnershipError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::AuthorizationError(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 상세 정보를 `log::error!`로 남긴 뒤 일반 메시지로 응답합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 중 서버 오류: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "message": self.client_message(),
            "successful": false
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
///
/// ```rust,ignore
/// async fn create_post(request: CreatePostRequest) -> AppResult<Post> { ... }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let hashed = bcrypt::hash(&password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
