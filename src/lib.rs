//! 소셜 네트워크 백엔드
//!
//! 회원가입/로그인, 게시물, 댓글, 좋아요, 팔로우를 제공하는 REST API 서버입니다.
//! 보호된 모든 요청은 토큰 검증 → 세션 해석 → 접근 판정 파이프라인을 거칩니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /users, /posts, /comments, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← TokenService → SessionResolver → 역할 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← DocumentStore (MongoDB | 인메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use social_network_backend::config::AppConfig;
//! use social_network_backend::core::registry::ServiceRegistry;
//! use social_network_backend::routes::configure_all_routes;
//!
//! let registry = ServiceRegistry::in_memory(&AppConfig::for_tests("secret"));
//! let app = App::new()
//!     .configure(|cfg| registry.configure(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
