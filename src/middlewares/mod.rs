//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 접근 제어를 담당합니다.
//!
//! - [`auth_middleware::AuthMiddleware`]: 라우트에 씌우는 Transform
//! - [`auth_inner::authorize`]: HTTP 없이도 호출 가능한 접근 판정 함수
//!
//! ## 특정 리소스에만 적용
//! ```rust,ignore
//! web::scope("/posts")
//!     .wrap(AuthMiddleware::required())
//!     .service(handlers::posts::list_posts);
//! ```

pub mod auth_middleware;
pub mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use auth_inner::authorize;
