//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 내 정보 조회/수정, 팔로우, 프로필, 관리자 삭제를 담당합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 UserService                  │
//! │  signup · login · me · update · delete       │
//! │  follow · profile                            │
//! └───────┬──────────────┬──────────────┬────────┘
//!         ▼              ▼              ▼
//!  UserRepository  PostRepository  NetworkRepository
//!         │
//!         └──► TokenService (로그인 시 토큰 발급)
//! ```
//!
//! ## 비밀번호
//!
//! - bcrypt로 해싱하며 cost는 [`PasswordConfig`]가 환경별로 정합니다.
//! - 해시는 어떤 응답 DTO에도 포함되지 않습니다.

use std::sync::Arc;
use bcrypt::{hash, verify};
use log::{debug, info, warn};
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::common::MessageResponse;
use crate::domain::dto::posts::response::PostResponse;
use crate::domain::dto::users::request::{LoginRequest, SignupRequest, UpdateUserRequest};
use crate::domain::dto::users::response::{LoginResponse, ProfileResponse, UserEnvelope, UserResponse};
use crate::domain::entities::{Entity, User};
use crate::repositories::{NetworkRepository, PostRepository, UserRepository};
use crate::services::auth::token_service::TokenService;
use crate::utils::string_utils::{clean_optional_string, required_field};

const SIGNUP_INVALID: &str = "Provide valid details for signup";
const LOGIN_INVALID: &str = "Provide valid credentials";
const UPDATE_INVALID: &str = "Provide valid details for update";
const USER_NOT_FOUND: &str = "User not found";
const EMAIL_TAKEN: &str = "User already exists with this email";

/// 사용자 관리 비즈니스 로직 서비스
///
/// 모든 의존성은 [`ServiceRegistry`](crate::core::registry::ServiceRegistry)가
/// 생성 시점에 주입합니다.
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    posts: PostRepository,
    networks: NetworkRepository,
    tokens: Arc<TokenService>,
    password: PasswordConfig,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        posts: PostRepository,
        networks: NetworkRepository,
        tokens: Arc<TokenService>,
        password: PasswordConfig,
    ) -> Self {
        Self {
            users,
            posts,
            networks,
            tokens,
            password,
        }
    }

    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이름/이메일/비밀번호 누락 또는 형식 오류
    /// * `ConflictError` - 이미 가입된 이메일
    pub async fn signup(&self, request: SignupRequest) -> AppResult<UserEnvelope> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(SIGNUP_INVALID.to_string()))?;

        let name = required_field(request.name, SIGNUP_INVALID)?;
        let email = required_field(request.email, SIGNUP_INVALID)?;
        let password = required_field(request.password, SIGNUP_INVALID)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.hash_password(&password)?;
        let user = User::new(
            name,
            email,
            password_hash,
            request.role.unwrap_or_default(),
            clean_optional_string(request.photo_url),
        );

        let created = self.users.create(user).await?;
        info!("✅ 사용자 생성 완료: {} ({})", created.id_hex(), created.role);

        Ok(UserEnvelope::new(created))
    }

    /// 로그인 후 토큰 발급
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이메일/비밀번호 누락, 비밀번호 불일치
    /// * `NotFound` - 가입되지 않은 이메일
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = required_field(request.email, LOGIN_INVALID)?;
        let password = required_field(request.password, LOGIN_INVALID)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        let matched = verify(&password, &user.password).context("비밀번호 검증 실패")?;
        if !matched {
            warn!("비밀번호 불일치: {}", user.id_hex());
            return Err(AppError::ValidationError("Please provide correct password".to_string()));
        }

        let token = self.tokens.issue(&user.id_hex(), user.role)?;
        debug!("토큰 발급: {}", user.id_hex());

        Ok(LoginResponse::new(user, token))
    }

    /// 현재 사용자 조회
    pub async fn me(&self, user_id: &ObjectId) -> AppResult<UserEnvelope> {
        let user = self.find_user(user_id).await?;
        Ok(UserEnvelope::new(user))
    }

    /// 내 정보 수정
    ///
    /// 비밀번호는 다시 해싱됩니다. 역할은 바뀌지 않습니다.
    pub async fn update(&self, user_id: &ObjectId, request: UpdateUserRequest) -> AppResult<UserEnvelope> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(UPDATE_INVALID.to_string()))?;

        let mut user = self.find_user(user_id).await?;

        if let Some(name) = clean_optional_string(request.name) {
            user.name = name;
        }

        if let Some(email) = clean_optional_string(request.email) {
            if email != user.email {
                if let Some(other) = self.users.find_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(AppError::ConflictError(EMAIL_TAKEN.to_string()));
                    }
                }
                user.email = email;
            }
        }

        if let Some(password) = clean_optional_string(request.password) {
            user.password = self.hash_password(&password)?;
        }

        if let Some(photo_url) = clean_optional_string(request.photo_url) {
            user.photo_url = Some(photo_url);
        }

        let saved = self.users.save(user).await?;
        info!("사용자 정보 수정: {}", saved.id_hex());

        Ok(UserEnvelope::with_message(saved, "Update successfully"))
    }

    /// 사용자 삭제 (관리자)
    pub async fn delete(&self, user_id: &ObjectId) -> AppResult<UserEnvelope> {
        let deleted = self
            .users
            .delete(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        info!("🗑️ 사용자 삭제: {}", user_id.to_hex());
        Ok(UserEnvelope::with_message(deleted, "Deleted successfully"))
    }

    /// 다른 사용자 팔로우
    ///
    /// 이미 팔로우 중이면 새 관계를 만들지 않고 성공으로 응답합니다.
    pub async fn follow(&self, follower: &ObjectId, target: &ObjectId) -> AppResult<MessageResponse> {
        if follower == target {
            return Err(AppError::ValidationError("You can't follow yourself".to_string()));
        }

        self.find_user(target).await?;

        let (_, created) = self.networks.find_or_create(follower, target).await?;
        if created {
            info!("팔로우: {} -> {}", follower.to_hex(), target.to_hex());
        }

        Ok(MessageResponse::success("Followed"))
    }

    /// 프로필 조회
    ///
    /// `followerList`는 나를 팔로우하는 사용자, `followingList`는 내가 팔로우하는 사용자입니다.
    pub async fn profile(&self, user_id: &ObjectId) -> AppResult<ProfileResponse> {
        let user = self.find_user(user_id).await?;

        let posts = self
            .posts
            .find_by_author(user_id)
            .await?
            .into_iter()
            .map(PostResponse::from)
            .collect();

        let follower_ids: Vec<ObjectId> = self
            .networks
            .followers_of(user_id)
            .await?
            .into_iter()
            .map(|network| network.follower)
            .collect();

        let following_ids: Vec<ObjectId> = self
            .networks
            .followings_of(user_id)
            .await?
            .into_iter()
            .map(|network| network.following)
            .collect();

        Ok(ProfileResponse {
            user: UserResponse::from(user),
            posts,
            follower_list: self.users_in_order(&follower_ids).await?,
            following_list: self.users_in_order(&following_ids).await?,
            successful: true,
        })
    }

    async fn find_user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// ID 순서대로 사용자 응답을 만듭니다. 삭제된 사용자는 건너뜁니다.
    async fn users_in_order(&self, ids: &[ObjectId]) -> AppResult<Vec<UserResponse>> {
        let mut found = self.users.find_many_by_ids(ids).await?;

        Ok(ids
            .iter()
            .filter_map(|id| found.remove(id))
            .map(UserResponse::from)
            .collect())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.password.bcrypt_cost).context("비밀번호 해싱 실패")
    }
}
