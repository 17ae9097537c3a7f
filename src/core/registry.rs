//! # Service Registry
//!
//! 애플리케이션의 모든 서비스를 한 번에 조립하고 Actix-Web `app_data`로 등록합니다.
//!
//! 전역 싱글톤 없이, 시작 시점에 만든 [`AppConfig`]와 저장소 묶음([`DataStores`])에서
//! 모든 의존성을 명시적으로 생성합니다. 조립이 끝난 뒤에는 읽기 전용이며
//! 각 워커는 `Arc`를 공유합니다.
//!
//! ```text
//! AppConfig ──┐
//!             ├──► ServiceRegistry ──► configure(cfg) ──► web::Data<T> (워커 공유)
//! DataStores ─┘        │
//!                      ├─ TokenService
//!                      ├─ SessionResolver
//!                      ├─ UserService
//!                      ├─ PostService
//!                      └─ CommentService
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! // 운영: MongoDB
//! let registry = ServiceRegistry::with_mongo(&config, &database);
//!
//! // 테스트: 인메모리
//! let registry = ServiceRegistry::in_memory(&AppConfig::for_tests("secret"));
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| registry.configure(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;
use actix_web::web;
use crate::config::AppConfig;
use crate::db::Database;
use crate::repositories::{
    CommentRepository, DataStores, LikeRepository, NetworkRepository, PostRepository, UserRepository,
};
use crate::services::auth::{SessionResolver, TokenService};
use crate::services::comments::CommentService;
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::utils::display_terminal::{print_final_summary, print_sub_task};

/// 조립이 끝난 서비스 묶음
#[derive(Clone)]
pub struct ServiceRegistry {
    pub tokens: Arc<TokenService>,
    pub sessions: Arc<SessionResolver>,
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl ServiceRegistry {
    /// 저장소 구현 수 (users, posts, comments, likes, networks)
    const REPOSITORY_COUNT: usize = 5;
    const SERVICE_COUNT: usize = 5;

    /// MongoDB 컬렉션 기반으로 조립
    pub fn with_mongo(config: &AppConfig, database: &Database) -> Self {
        Self::from_stores(config, DataStores::mongo(database))
    }

    /// 인메모리 저장소로 조립 (테스트, 로컬 실행)
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::from_stores(config, DataStores::memory())
    }

    pub fn from_stores(config: &AppConfig, stores: DataStores) -> Self {
        let users = UserRepository::new(stores.users);
        let posts = PostRepository::new(stores.posts);
        let likes = LikeRepository::new(stores.likes);
        let comments = CommentRepository::new(stores.comments);
        let networks = NetworkRepository::new(stores.networks);

        let tokens = Arc::new(TokenService::new(config.jwt.clone()));
        let sessions = Arc::new(SessionResolver::new(tokens.clone(), users.clone()));

        let user_service = UserService::new(
            users.clone(),
            posts.clone(),
            networks,
            tokens.clone(),
            config.password.clone(),
        );
        let post_service = PostService::new(posts.clone(), likes, users.clone());
        let comment_service = CommentService::new(comments, posts, users);

        Self {
            tokens,
            sessions,
            users: Arc::new(user_service),
            posts: Arc::new(post_service),
            comments: Arc::new(comment_service),
        }
    }

    /// 모든 서비스를 `web::Data`로 등록합니다.
    ///
    /// 미들웨어는 `web::Data<SessionResolver>`를, 핸들러는 각 서비스의 `web::Data`를 꺼내 씁니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.sessions.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.posts.clone()))
            .app_data(web::Data::from(self.comments.clone()));
    }

    /// 기동 시 구성 요약 출력
    pub fn print_summary(&self) {
        for name in ["TokenService", "SessionResolver", "UserService", "PostService", "CommentService"] {
            print_sub_task(name, "OK");
        }
        print_final_summary(Self::REPOSITORY_COUNT, Self::SERVICE_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpResponse};
    use crate::domain::models::auth::role::Role;

    async fn expires_in(tokens: web::Data<TokenService>) -> HttpResponse {
        HttpResponse::Ok().body(tokens.expires_in().to_string())
    }

    #[actix_web::test]
    async fn test_registered_services_share_one_secret() {
        let registry = ServiceRegistry::in_memory(&AppConfig::for_tests("registry-secret"));
        let token = registry.tokens.issue("u1", Role::User).unwrap();

        assert_eq!(registry.tokens.parse(&token).unwrap().user_id, "u1");

        let app = test::init_service(
            App::new()
                .configure(|cfg| registry.configure(cfg))
                .route("/expires", web::get().to(expires_in)),
        )
        .await;

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/expires").to_request()).await;
        assert_eq!(body, "86400".as_bytes());
    }
}
