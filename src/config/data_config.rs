//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 데이터베이스, 서버 바인딩, CORS, Rate Limiting, 패스워드 해싱 설정을 관리합니다.
//! 모든 값은 기동 시점에 한 번 읽혀 [`AppConfig`](super::AppConfig)에 담깁니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT`, `NODE_ENV`, `PROFILE` 순서로 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .or_else(|_| env::var("PROFILE"))
            .unwrap_or_else(|_| "development".to_string());

        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값은 `Development`로 취급합니다. `production`으로 명시된 경우에만
    /// 운영 설정이 적용됩니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            "test" | "testing" => Environment::Test,
            _ => Environment::Development,
        }
    }

    /// 이 환경에서 로드할 `.env` 파일 이름
    ///
    /// - Production → `.env.production`
    /// - 그 외 → `.env.development`
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Production => ".env.production",
            _ => ".env.development",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 환경 변수 `BCRYPT_COST`가 유효 범위(4-15)면 그 값을,
    /// 아니면 환경별 기본값을 사용합니다.
    pub fn from_env(environment: &Environment) -> Self {
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment));

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩 호스트. 기본값: "0.0.0.0"
    pub host: String,
    /// 바인딩 포트. 기본값: 8081
    pub port: u16,
    /// 워커 스레드 수. 기본값: 4
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8081),
            workers: env::var("SERVER_WORKERS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|workers| *workers > 0)
                .unwrap_or(4),
        }
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 연결 URI (`MONGO_URI`, 없으면 `MONGODB_URI`)
    pub uri: String,
    /// 데이터베이스 이름 (`DATABASE_NAME`). 없으면 URI의 기본 DB를 사용합니다.
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let uri = env::var("MONGO_URI")
            .or_else(|_| env::var("MONGODB_URI"))
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        Self {
            uri,
            name: env::var("DATABASE_NAME").ok().filter(|name| !name.trim().is_empty()),
        }
    }

    /// `MONGO_URI=memory`이면 MongoDB 대신 인메모리 저장소로 실행합니다.
    pub fn is_in_memory(&self) -> bool {
        self.uri.trim().eq_ignore_ascii_case("memory")
    }
}

/// CORS 설정
///
/// 단일 Origin만 허용하며, 자격 증명(쿠키, Authorization 헤더) 전송을 허용합니다.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// 허용 Origin. 기본값: `http://localhost:3000`
    pub origin: String,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self {
            origin: env::var("ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// 초당 허용 요청 수 (`RATE_LIMIT_PER_SECOND`, 기본값 100)
    pub per_second: u64,
    /// 버스트 허용량 (`RATE_LIMIT_BURST_SIZE`, 기본값 200)
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}
