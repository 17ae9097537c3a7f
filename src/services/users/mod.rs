//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인, 프로필, 팔로우 관계를 다룹니다.

pub mod user_service;

pub use user_service::UserService;
