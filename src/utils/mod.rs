//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 요청 값 정리, 경로 ID 파싱
//! - [`display_terminal`] - 기동 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;
