pub mod request;
pub mod response;

pub use request::CreateCommentRequest;
pub use response::{CommentEnvelope, CommentListResponse, CommentResponse};
