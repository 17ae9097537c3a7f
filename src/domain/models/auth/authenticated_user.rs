use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::role::Role;

/// 인증 미들웨어가 요청 Extensions에 넣어 주는 사용자 정보
///
/// 토큰의 클레임이 아니라 저장소에서 방금 읽은 사용자 레코드를 담고 있으므로
/// 역할이나 이름은 요청 시점의 최신 값입니다. 요청이 끝나면 함께 버려집니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    id: ObjectId,
    pub user: User,
}

impl AuthenticatedUser {
    /// 저장소에서 읽은 사용자로 생성합니다. `_id`가 없는 레코드는 거부됩니다.
    pub fn from_user(user: User) -> Option<Self> {
        user.id.map(|id| Self { id, user })
    }

    /// 사용자 ObjectId
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어를 거치지 않은 라우트에서 추출하면 403 인증 에러가 됩니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Please login to continue".to_string(),
            )
            .into())),
        }
    }
}
