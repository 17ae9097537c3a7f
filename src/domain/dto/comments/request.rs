use serde::{Deserialize, Serialize};
use validator::Validate;

/// 댓글 작성 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(required, length(min = 1, max = 2000))]
    pub content: Option<String>,

    #[validate(required, length(min = 1))]
    pub post_id: Option<String>,
}
