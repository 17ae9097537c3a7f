//! # Core Module
//!
//! 애플리케이션 전역에서 쓰는 뼈대입니다.
//!
//! - [`errors`]: [`AppError`]와 HTTP 응답 변환
//! - [`registry`]: 서비스 조립과 `app_data` 등록
//!
//! ```rust,ignore
//! use crate::core::{AppError, AppResult, ServiceRegistry};
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
