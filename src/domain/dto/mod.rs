//! HTTP 요청/응답 DTO

pub mod common;
pub mod users;
pub mod posts;
pub mod comments;

pub use common::{MessageResponse, PageInfo, UserRef};
