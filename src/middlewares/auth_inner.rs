//! AuthMiddleware 인증 로직의 핵심적인 기능
//!
//! 판정은 [`authorize`] 하나에 모여 있고, [`AuthMiddlewareService`]는 그 결과를
//! 요청 Extensions 삽입 또는 거부 응답으로 옮기기만 합니다.
//!
//! ```text
//! Start ─► CredentialPresent? ─► SignatureValid & NotExpired? ─► SubjectExists? ─► RoleAllowed? ─► Forwarded
//!              │ no                      │ no                          │ no              │ no
//!              └────────────────────────┴─────────────────────────────┴─────────────────┴──► Rejected(reason)
//! ```

use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AllowedRoles, AuthenticatedUser};
use crate::services::auth::session_resolver::{AuthRejection, SessionResolver};

/// 헤더 값 하나로 접근 허용 여부를 판정합니다.
///
/// 1. 세션 해석 (토큰 검증 + 저장소 조회 1회)
/// 2. 허용 목록이 비어 있지 않으면 *현재 저장된* 역할로 검사
///
/// 재시도는 하지 않습니다.
pub async fn authorize(
    resolver: &SessionResolver,
    header_value: Option<&str>,
    allowed: &AllowedRoles,
) -> Result<AuthenticatedUser, AuthRejection> {
    let user = resolver.resolve(header_value).await?;

    if !allowed.is_satisfied(user.role) {
        return Err(AuthRejection::RoleNotAllowed);
    }

    AuthenticatedUser::from_user(user).ok_or(AuthRejection::SubjectNotFound)
}

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub allowed: AllowedRoles,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let resolver = req.app_data::<web::Data<SessionResolver>>().cloned();
            let Some(resolver) = resolver else {
                log::error!("SessionResolver가 등록되지 않았습니다: {}", req.path());
                return Ok(reject(req, AppError::InternalError("SessionResolver missing".to_string())));
            };

            let header_value = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            match authorize(&resolver, header_value.as_deref(), &allowed).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {} ({})", user.id().to_hex(), user.role());
                    req.extensions_mut().insert(user);
                }
                Err(rejection) => {
                    match &rejection {
                        AuthRejection::StoreUnavailable(detail) => {
                            log::error!("인증 중 사용자 저장소 오류: {} ({})", detail, req.path());
                        }
                        AuthRejection::RoleNotAllowed => {
                            log::warn!("권한 부족: {} 필요 역할 {:?}", req.path(), allowed.roles());
                        }
                        other => log::warn!("인증 실패: {} ({})", other, req.path()),
                    }
                    return Ok(reject(req, AppError::from(rejection)));
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, error.error_response()).map_into_right_body()
}
