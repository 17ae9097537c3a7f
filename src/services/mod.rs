//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! - [`auth`]: 토큰 발급/검증과 세션 해석
//! - [`users`]: 회원가입, 로그인, 프로필, 팔로우
//! - [`posts`]: 게시물과 좋아요
//! - [`comments`]: 댓글
//!
//! 모든 서비스는 [`ServiceRegistry`](crate::core::registry::ServiceRegistry)가 조립합니다.

pub mod auth;
pub mod users;
pub mod posts;
pub mod comments;
