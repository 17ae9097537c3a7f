//! # User HTTP Handlers
//!
//! `/users` 스코프의 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 | 상태 코드 |
//! |--------|------|------|------|-----------|
//! | `POST` | `/users` | - | 회원가입 | 201 Created |
//! | `POST` | `/users/login` | - | 로그인, 토큰 발급 | 200 OK |
//! | `POST` | `/users/follow/{userId}` | 로그인 | 팔로우 | 200 OK |
//! | `PATCH` | `/users` | 로그인 | 내 정보 수정 | 200 OK |
//! | `GET` | `/users/me` | 로그인 | 내 정보 | 200 OK |
//! | `GET` | `/users/profile` | 로그인 | 프로필 (게시물, 팔로워, 팔로잉) | 200 OK |
//! | `DELETE` | `/users/{id}` | admin | 사용자 삭제 | 200 OK |
//!
//! 보호된 엔드포인트는 라우트 매크로의 `wrap` 인자로 [`AuthMiddleware`]를 씌웁니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{LoginRequest, SignupRequest, UpdateUserRequest};
use crate::domain::models::auth::{AuthenticatedUser, Role};
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;
use crate::utils::string_utils::parse_object_id;

/// 회원가입
///
/// `role`을 생략하면 `user`로 가입됩니다.
#[post("")]
pub async fn signup(
    service: web::Data<UserService>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.signup(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 로그인
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/follow/{user_id}", wrap = "AuthMiddleware::required()")]
pub async fn follow(
    service: web::Data<UserService>,
    current: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let target = parse_object_id(&path, "user id")?;
    let response = service.follow(&current.id(), &target).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("", wrap = "AuthMiddleware::required()")]
pub async fn update_me(
    service: web::Data<UserService>,
    current: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.update(&current.id(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn get_me(
    service: web::Data<UserService>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = service.me(&current.id()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/profile", wrap = "AuthMiddleware::required()")]
pub async fn get_profile(
    service: web::Data<UserService>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = service.profile(&current.id()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 사용자 삭제 (관리자 전용)
#[delete("/{id}", wrap = "AuthMiddleware::with_roles(&[Role::Admin])")]
pub async fn delete_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_object_id(&path, "user id")?;
    let response = service.delete(&user_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
