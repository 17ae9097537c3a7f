//! 게시물 서비스 모듈
//!
//! 게시물 작성/검색/수정/삭제와 좋아요를 다룹니다.

pub mod post_service;

pub use post_service::PostService;
