//! JWT 토큰 관리 서비스 구현
//!
//! 로그인 시 발급하는 HS256 토큰의 생성과 검증을 담당합니다.
//! 서명 비밀키는 생성자에 전달된 [`JwtConfig`]만 사용하며, 같은 배포 안에서
//! 발급과 검증은 항상 같은 키로 이루어집니다.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::models::auth::role::Role;
use crate::domain::models::token::TokenClaims;

/// 토큰 검증 실패 사유
///
/// 내부 로깅용 구분이며, 클라이언트에는 모두 같은 인증 실패 응답으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 형식이 잘못되었거나 클레임을 해석할 수 없음
    #[error("malformed token")]
    Malformed,
    /// 서명이 비밀키와 맞지 않음
    #[error("invalid token signature")]
    InvalidSignature,
    /// 만료 시각이 지남
    #[error("token expired")]
    Expired,
}

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용합니다. 토큰은 폐기 목록 없이 만료 시각으로만 무효화됩니다.
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 토큰 유효 기간(초)
    pub fn expires_in(&self) -> i64 {
        self.config.expiration.num_seconds()
    }

    /// 사용자를 위한 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `subject_id` - 토큰 주체(사용자 ID)
    /// * `role` - 발급 시점의 역할
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue(&user.id_hex(), user.role)?;
    /// ```
    pub fn issue(&self, subject_id: &str, role: Role) -> Result<String, AppError> {
        self.issue_at(subject_id, role, Utc::now())
    }

    /// 발급 시각을 지정하여 토큰 생성
    pub fn issue_at(&self, subject_id: &str, role: Role, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let iat = issued_at.timestamp();
        let claims = TokenClaims {
            user_id: subject_id.to_string(),
            role,
            iat,
            exp: iat + self.expires_in(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `TokenError::Malformed` - 잘못된 형식
    /// * `TokenError::InvalidSignature` - 서명 불일치
    /// * `TokenError::Expired` - 만료
    pub fn parse(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.parse_at(token, Utc::now())
    }

    /// 기준 시각을 지정하여 토큰 검증
    ///
    /// `now >= exp`이면 만료로 판정합니다. 허용 오차(leeway)는 없습니다.
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 아래에서 주어진 기준 시각으로 직접 비교
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Authorization 헤더 값에서 토큰 부분 추출
    ///
    /// 토큰 그대로 보내는 클라이언트와 `Bearer {token}` 형식 모두를 받습니다.
    /// 비어 있으면 `None`입니다.
    ///
    /// ```rust,ignore
    /// assert_eq!(TokenService::strip_credential("Bearer abc"), Some("abc"));
    /// assert_eq!(TokenService::strip_credential("abc"), Some("abc"));
    /// ```
    pub fn strip_credential(header_value: &str) -> Option<&str> {
        let trimmed = header_value.trim();
        if trimmed.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = match trimmed.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim_start(),
            _ => trimmed,
        };

        if token.is_empty() { None } else { Some(token) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service(secret: &str) -> TokenService {
        TokenService::new(JwtConfig::with_secret(secret))
    }

    #[test]
    fn test_issue_then_parse_roundtrip() {
        let tokens = service("secret-a");

        for (subject, role) in [("u1", Role::User), ("64b7f0c2a1b2c3d4e5f60718", Role::Admin)] {
            let token = tokens.issue(subject, role).unwrap();
            let claims = tokens.parse(&token).unwrap();

            assert_eq!(claims.user_id, subject);
            assert_eq!(claims.role, role);
            assert_eq!(claims.exp - claims.iat, 86_400);
        }
    }

    #[test]
    fn test_token_expires_after_one_day() {
        let tokens = service("secret-a");
        let issued_at = Utc::now() - Duration::days(3);
        let token = tokens.issue_at("u1", Role::User, issued_at).unwrap();

        assert!(tokens.parse_at(&token, issued_at + Duration::hours(23)).is_ok());
        assert_eq!(
            tokens.parse_at(&token, issued_at + Duration::days(1)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            tokens.parse_at(&token, issued_at + Duration::days(2)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service("secret-a").issue("u1", Role::User).unwrap();

        assert_eq!(
            service("secret-b").parse(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service("secret-a");

        assert_eq!(tokens.parse("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(tokens.parse(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_strip_credential() {
        assert_eq!(TokenService::strip_credential("Bearer abc.def"), Some("abc.def"));
        assert_eq!(TokenService::strip_credential("bearer abc.def"), Some("abc.def"));
        assert_eq!(TokenService::strip_credential("  abc.def  "), Some("abc.def"));
        assert_eq!(TokenService::strip_credential("Bearer "), None);
        assert_eq!(TokenService::strip_credential("   "), None);
    }
}
