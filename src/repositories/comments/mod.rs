pub mod comment_repo;
