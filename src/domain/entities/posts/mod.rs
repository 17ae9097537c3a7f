pub mod post;
pub mod like;
