//! # Authentication Configuration Module
//!
//! JWT 서명 비밀키와 토큰 유효 기간을 관리합니다.
//!
//! 비밀키는 기동 시점에 한 번 읽혀 [`JwtConfig`] 값으로 만들어지고,
//! [`TokenService`](crate::services::auth::TokenService) 생성자에 그대로 전달됩니다.
//! 요청 처리 중에는 환경 변수를 다시 읽지 않습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_KEY="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! 비밀키를 교체하면 이전에 발급된 모든 토큰이 즉시 무효화됩니다.
//! 별도의 폐기 목록은 없습니다.

use std::env;
use chrono::Duration;
use crate::config::Environment;
use crate::core::errors::{AppError, AppResult};

/// 개발 환경에서만 허용되는 기본 비밀키
const DEV_FALLBACK_SECRET: &str = "dev-only-insecure-jwt-key";

const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// 토큰 유효 기간 상한 (1년)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// JWT 토큰 설정
///
/// ## 권장 설정값
///
/// - 최소 256비트 (32바이트) 길이의 랜덤 키
/// - 환경별로 다른 키 사용
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    /// 토큰 유효 기간. 기본값 1일
    pub expiration: Duration,
}

impl JwtConfig {
    /// 명시적인 비밀키와 유효 기간으로 설정을 만듭니다.
    pub fn new(secret: impl Into<String>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }

    /// 1일 유효 기간을 갖는 설정
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(secret, Duration::days(1))
    }

    /// 환경 변수에서 JWT 설정을 읽어옵니다.
    ///
    /// # Environment Variables
    ///
    /// * `JWT_KEY` (또는 `JWT_SECRET`) - 서명 비밀키
    /// * `JWT_EXPIRATION_HOURS` - 유효 기간 (시간, 기본값 24)
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 프로덕션에서 비밀키가 없거나 비어 있는 경우
    pub fn from_env(environment: &Environment) -> AppResult<Self> {
        let secret = env::var("JWT_KEY")
            .or_else(|_| env::var("JWT_SECRET"))
            .ok()
            .filter(|secret| !secret.trim().is_empty());

        let secret = match secret {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(AppError::ConfigurationError(
                    "JWT_KEY must be set in production".to_string(),
                ));
            }
            None => {
                log::warn!("JWT_KEY not set, using default (not secure for production!)");
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        let expiration = Self::parse_expiration(env::var("JWT_EXPIRATION_HOURS").ok().as_deref());

        Ok(Self::new(secret, expiration))
    }

    /// `JWT_EXPIRATION_HOURS` 값을 유효 기간으로 바꿉니다.
    ///
    /// 1시간 이상 [`MAX_EXPIRATION_HOURS`] 이하만 허용하며, 그 밖의 값은 기본값 24시간입니다.
    fn parse_expiration(raw: Option<&str>) -> Duration {
        let Some(raw) = raw else {
            return Duration::hours(DEFAULT_EXPIRATION_HOURS);
        };

        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|hours| (1..=MAX_EXPIRATION_HOURS).contains(hours))
            .and_then(Duration::try_hours)
            .unwrap_or_else(|| {
                log::warn!(
                    "JWT_EXPIRATION_HOURS 값이 올바르지 않습니다: {}. 기본값 {}시간 사용",
                    raw, DEFAULT_EXPIRATION_HOURS
                );
                Duration::hours(DEFAULT_EXPIRATION_HOURS)
            })
    }

    /// 서명 비밀키 바이트
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_defaults_to_one_day() {
        let config = JwtConfig::with_secret("abc");
        assert_eq!(config.expiration, Duration::days(1));
        assert_eq!(config.secret_bytes(), b"abc");
    }

    #[test]
    fn test_expiration_hours_are_bounded() {
        assert_eq!(JwtConfig::parse_expiration(None), Duration::hours(24));
        assert_eq!(JwtConfig::parse_expiration(Some("48")), Duration::hours(48));
        assert_eq!(JwtConfig::parse_expiration(Some("0")), Duration::hours(24));
        assert_eq!(JwtConfig::parse_expiration(Some("-3")), Duration::hours(24));
        assert_eq!(JwtConfig::parse_expiration(Some("abc")), Duration::hours(24));
        assert_eq!(
            JwtConfig::parse_expiration(Some(&i64::MAX.to_string())),
            Duration::hours(24)
        );
        assert_eq!(
            JwtConfig::parse_expiration(Some(&MAX_EXPIRATION_HOURS.to_string())),
            Duration::hours(MAX_EXPIRATION_HOURS)
        );
    }

    #[test]
    fn test_debug_masks_secret() {
        let config = JwtConfig::with_secret("top-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("top-secret"));
        assert!(printed.contains("***"));
    }
}
