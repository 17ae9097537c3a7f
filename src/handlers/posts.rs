//! # Post HTTP Handlers
//!
//! `/posts` 스코프의 엔드포인트입니다. 스코프 전체가 로그인을 요구합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/posts?query&tag&page&perPage` | 검색 + 페이지네이션 |
//! | `GET` | `/posts/{userId}` | 사용자의 게시물 |
//! | `POST` | `/posts` | 게시물 작성 |
//! | `POST` | `/posts/{postId}/like` | 좋아요 |
//! | `POST` | `/posts/{id}/unlike` | 좋아요 취소 (`id`는 좋아요 ID) |
//! | `PATCH` | `/posts/{id}` | 수정 (작성자) |
//! | `DELETE` | `/posts/{id}` | 삭제 (작성자 또는 관리자) |

use actix_web::{delete, get, patch, post, web, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::posts::request::{CreatePostRequest, PostListQuery, UpdatePostRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::posts::PostService;
use crate::utils::string_utils::parse_object_id;

#[get("")]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{user_id}")]
pub async fn list_posts_for_user(
    service: web::Data<PostService>,
    path: web::Path<String>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, AppError> {
    let author = parse_object_id(&path, "user id")?;
    let response = service.list_for_user(&author, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("")]
pub async fn create_post(
    service: web::Data<PostService>,
    current: AuthenticatedUser,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.create(&current.id(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/{post_id}/like")]
pub async fn like_post(
    service: web::Data<PostService>,
    current: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post_id = parse_object_id(&path, "post id")?;
    let response = service.like(&current.id(), &post_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/{id}/unlike")]
pub async fn unlike_post(
    service: web::Data<PostService>,
    current: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let like_id = parse_object_id(&path, "like id")?;
    let response = service.unlike(&current.id(), &like_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/{id}")]
pub async fn update_post(
    service: web::Data<PostService>,
    current: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let post_id = parse_object_id(&path, "post id")?;
    let response = service.update(&current.id(), &post_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
pub async fn delete_post(
    service: web::Data<PostService>,
    current: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let post_id = parse_object_id(&path, "post id")?;
    let response = service.delete(&current, &post_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
