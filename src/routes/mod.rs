//! 라우트 구성
//!
//! ```text
//! /health                 공개
//! /users                  회원가입/로그인 공개, 나머지는 핸들러별 AuthMiddleware
//! /posts                  스코프 전체 AuthMiddleware::required()
//! /comments               스코프 전체 AuthMiddleware::required()
//! ```

use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// JSON 본문 최대 크기 (50MB)
const JSON_LIMIT_BYTES: usize = 50 * 1024 * 1024;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_user_routes(cfg);
    configure_post_routes(cfg);
    configure_comment_routes(cfg);
}

/// 본문/쿼리 파싱 실패를 400 검증 에러로 통일
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, req| {
                log::warn!("요청 본문 파싱 실패 ({}): {}", req.path(), err);
                AppError::ValidationError("Invalid request body".to_string()).into()
            }),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("쿼리 파싱 실패 ({}): {}", req.path(), err);
        AppError::ValidationError("Invalid query parameters".to_string()).into()
    }));
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            // Public routes
            .service(handlers::users::signup)
            .service(handlers::users::login)
            // Protected routes (핸들러별 wrap)
            .service(handlers::users::follow)
            .service(handlers::users::update_me)
            .service(handlers::users::get_me)
            .service(handlers::users::get_profile)
            .service(handlers::users::delete_user),
    );
}

fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .wrap(AuthMiddleware::required())
            .service(handlers::posts::list_posts)
            .service(handlers::posts::create_post)
            .service(handlers::posts::like_post)
            .service(handlers::posts::unlike_post)
            .service(handlers::posts::list_posts_for_user)
            .service(handlers::posts::update_post)
            .service(handlers::posts::delete_post),
    );
}

fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .wrap(AuthMiddleware::required())
            .service(handlers::comments::create_comment)
            .service(handlers::comments::list_comments),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_network_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "successful": true
    }))
}
