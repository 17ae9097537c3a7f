//! 인증 미들웨어
//!
//! 보호된 라우트 앞에서 Authorization 헤더를 검증하고 현재 사용자를
//! 요청 Extensions에 넣습니다. 핸들러는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! web::resource("/me")
//!     .wrap(AuthMiddleware::required())
//!     .route(web::get().to(get_me));
//!
//! web::resource("/{id}")
//!     .wrap(AuthMiddleware::with_roles(&[Role::Admin]))
//!     .route(web::delete().to(delete_user));
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AllowedRoles, Role};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어
pub struct AuthMiddleware {
    /// 통과를 허용할 역할 (비어 있으면 인증된 모든 사용자)
    allowed: AllowedRoles,
}

impl AuthMiddleware {
    pub fn new(allowed: AllowedRoles) -> Self {
        Self { allowed }
    }

    /// 인증만 요구
    pub fn required() -> Self {
        Self::new(AllowedRoles::any())
    }

    /// 주어진 역할 중 하나를 요구
    pub fn with_roles(roles: &[Role]) -> Self {
        Self::new(AllowedRoles::only(roles))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::entities::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::middlewares::auth_inner::authorize;
    use crate::repositories::{DataStores, UserRepository};
    use crate::services::auth::session_resolver::{AuthRejection, SessionResolver};
    use crate::services::auth::token_service::TokenService;

    struct Fixture {
        tokens: Arc<TokenService>,
        users: UserRepository,
        resolver: SessionResolver,
    }

    fn fixture() -> Fixture {
        let tokens = Arc::new(TokenService::new(JwtConfig::with_secret("guard-secret")));
        let users = UserRepository::new(DataStores::memory().users);
        let resolver = SessionResolver::new(tokens.clone(), users.clone());

        Fixture { tokens, users, resolver }
    }

    async fn create_user(users: &UserRepository, email: &str, role: Role) -> User {
        users
            .create(User::new("u1".to_string(), email.to_string(), "hash".to_string(), role, None))
            .await
            .unwrap()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.id().to_hex())
    }

    macro_rules! guarded_app {
        ($resolver:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($resolver))
                    .service(
                        web::resource("/me")
                            .wrap(AuthMiddleware::required())
                            .route(web::get().to(whoami)),
                    )
                    .service(
                        web::resource("/admin")
                            .wrap(AuthMiddleware::with_roles(&[Role::Admin]))
                            .route(web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    fn get(path: &str, token: Option<&str>) -> test::TestRequest {
        let req = test::TestRequest::get().uri(path);
        match token {
            Some(token) => req.insert_header(("Authorization", token.to_string())),
            None => req,
        }
    }

    #[actix_web::test]
    async fn test_guard_end_to_end() {
        let f = fixture();
        let user = create_user(&f.users, "u1@example.com", Role::User).await;
        let id = user.id.unwrap();
        let token = f.tokens.issue(&id.to_hex(), Role::User).unwrap();
        let app = guarded_app!(f.resolver.clone());

        // 헤더 없음
        let res = test::call_service(&app, get("/me", None).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Please login to continue");
        assert_eq!(body["successful"], false);

        // 유효한 토큰 (Bearer 접두사 유무 모두)
        let body = test::call_and_read_body(&app, get("/me", Some(&token)).to_request()).await;
        assert_eq!(body, id.to_hex().as_bytes());
        let bearer = format!("Bearer {}", token);
        let res = test::call_service(&app, get("/me", Some(&bearer)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        // 사용자 삭제 후 같은 토큰
        f.users.delete(&id).await.unwrap();
        let res = test::call_service(&app, get("/me", Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "message": "User not found", "successful": false }));
    }

    #[actix_web::test]
    async fn test_forged_and_expired_tokens_are_rejected_alike() {
        let f = fixture();
        let user = create_user(&f.users, "u1@example.com", Role::User).await;
        let id = user.id.unwrap().to_hex();
        let app = guarded_app!(f.resolver.clone());

        let forged = TokenService::new(JwtConfig::with_secret("other-secret"))
            .issue(&id, Role::User)
            .unwrap();
        let expired = f
            .tokens
            .issue_at(&id, Role::User, chrono::Utc::now() - chrono::Duration::days(2))
            .unwrap();

        for token in [forged.as_str(), expired.as_str(), "not-a-token"] {
            let res = test::call_service(&app, get("/me", Some(token)).to_request()).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
            let body: serde_json::Value = test::read_body_json(res).await;
            assert_eq!(body["message"], "Please login to continue");
        }
    }

    #[actix_web::test]
    async fn test_role_gate_uses_current_stored_role() {
        let f = fixture();
        let mut user = create_user(&f.users, "u1@example.com", Role::User).await;
        let id = user.id.unwrap();
        let token = f.tokens.issue(&id.to_hex(), Role::User).unwrap();
        let app = guarded_app!(f.resolver.clone());

        let res = test::call_service(&app, get("/admin", Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "You are not allowed to access this path");

        // 토큰의 역할은 user 그대로지만 저장된 역할이 admin으로 바뀜
        user.role = Role::Admin;
        f.users.save(user).await.unwrap();

        let res = test::call_service(&app, get("/admin", Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_admin_claim_does_not_bypass_stored_role() {
        let f = fixture();
        let user = create_user(&f.users, "u1@example.com", Role::User).await;
        let token = f.tokens.issue(&user.id.unwrap().to_hex(), Role::Admin).unwrap();

        let rejection = authorize(&f.resolver, Some(&token), &AllowedRoles::only(&[Role::Admin]))
            .await
            .unwrap_err();
        assert!(matches!(rejection, AuthRejection::RoleNotAllowed));

        let allowed = authorize(&f.resolver, Some(&token), &AllowedRoles::any()).await.unwrap();
        assert_eq!(allowed.role(), Role::User);
    }

    #[actix_web::test]
    async fn test_unknown_subject_is_rejected() {
        let f = fixture();
        let token = f.tokens.issue(&ObjectId::new().to_hex(), Role::Admin).unwrap();

        let rejection = authorize(&f.resolver, Some(&token), &AllowedRoles::any()).await.unwrap_err();
        assert!(matches!(rejection, AuthRejection::SubjectNotFound));
    }

    #[actix_web::test]
    async fn test_missing_resolver_is_server_error() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let res = test::call_service(&app, get("/me", Some("token")).to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
