//! 요청 범위 모델과 토큰 모델

pub mod auth;
pub mod token;
