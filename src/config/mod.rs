//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 기동 시점에 한 번 읽어 [`AppConfig`] 하나로 모읍니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 데이터베이스, 서버, CORS, Rate Limiting, 패스워드 설정
//! - [`auth_config`] - JWT 서명 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리
//!
//! `NODE_ENV=production`이면 `.env.production`, 그 외에는 `.env.development`를 로드합니다.
//!
//! ### 2. 명시적 전달
//!
//! 설정값은 생성자 인자로 서비스에 전달되며, 요청 처리 경로에서 환경 변수를 읽지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use social_network_backend::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! export NODE_ENV="production"
//! export JWT_KEY="your-super-secret-key"
//! export MONGO_URI="mongodb://localhost:27017/social"
//! export ORIGIN="https://app.example.com"
//! export PORT="8081"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::core::errors::AppResult;

/// 애플리케이션 전체 설정
///
/// `main`에서 한 번 만들어져 레지스트리와 서버 구성에 전달됩니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 현재 프로세스 환경 변수에서 전체 설정을 읽어옵니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 프로덕션에서 필수 값(JWT_KEY)이 없는 경우
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::current();

        Ok(Self {
            jwt: JwtConfig::from_env(&environment)?,
            password: PasswordConfig::from_env(&environment),
            database: DatabaseConfig::from_env(),
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            environment,
        })
    }

    /// 테스트용 설정
    ///
    /// 외부 환경에 의존하지 않으며 bcrypt cost는 최소값(4)입니다.
    pub fn for_tests(jwt_secret: &str) -> Self {
        let environment = Environment::Test;

        Self {
            jwt: JwtConfig::with_secret(jwt_secret),
            password: PasswordConfig {
                bcrypt_cost: PasswordConfig::bcrypt_cost_for_env(&environment),
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                name: Some("social_network_test".to_string()),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
                workers: 1,
            },
            cors: CorsConfig {
                origin: "http://localhost:3000".to_string(),
            },
            rate_limit: RateLimitConfig {
                per_second: 100,
                burst_size: 200,
            },
            environment,
        }
    }
}
