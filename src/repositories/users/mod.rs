//! 사용자 데이터 액세스
//!
//! [`UserRepository`](user_repo::UserRepository)는 이메일 중복 확인, 비밀번호 포함 조회,
//! 여러 ID 일괄 조회를 제공합니다.

pub mod user_repo;
