//! 도메인 계층
//!
//! - [`entities`]: MongoDB 컬렉션에 저장되는 문서
//! - [`dto`]: HTTP 요청/응답 본문
//! - [`models`]: 인증 모델 (역할, 토큰 클레임, 인증된 사용자)

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::auth::{AllowedRoles, AuthenticatedUser, Role};
pub use models::token::TokenClaims;
