//! # HTTP Handlers
//!
//! 요청 본문/경로를 서비스 호출로 옮기는 얇은 계층입니다.
//! 비즈니스 규칙은 `services`에, 접근 제어는 `middlewares`에 있습니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_post(
//!     service: web::Data<PostService>,
//!     current: AuthenticatedUser,
//!     payload: web::Json<CreatePostRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let response = service.create(&current.id(), payload.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod users;
pub mod posts;
pub mod comments;
