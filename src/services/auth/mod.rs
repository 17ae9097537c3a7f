//! 인증 서비스 모듈
//!
//! - [`token_service`]: HS256 토큰 발급과 검증
//! - [`session_resolver`]: Authorization 헤더 값을 현재 사용자로 해석
//!
//! ```rust,ignore
//! let token = tokens.issue(&user.id_hex(), user.role)?;
//! let user = resolver.resolve(Some(&token)).await?;
//! ```

pub mod token_service;
pub mod session_resolver;

pub use token_service::{TokenError, TokenService};
pub use session_resolver::{AuthRejection, SessionResolver};
