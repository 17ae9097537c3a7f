pub mod post_repo;
pub mod like_repo;
