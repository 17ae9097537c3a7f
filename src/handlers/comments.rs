//! # Comment HTTP Handlers
//!
//! `/comments` 스코프의 엔드포인트입니다. 스코프 전체가 로그인을 요구합니다.

use actix_web::{get, post, web, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::comments::request::CreateCommentRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::comments::CommentService;
use crate::utils::string_utils::parse_object_id;

/// 댓글 작성 (`{content, postId}`)
#[post("")]
pub async fn create_comment(
    service: web::Data<CommentService>,
    current: AuthenticatedUser,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.create(&current.id(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 게시물의 댓글 목록
#[get("/{post_id}")]
pub async fn list_comments(
    service: web::Data<CommentService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post_id = parse_object_id(&path, "post id")?;
    let response = service.list_for_post(&post_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
