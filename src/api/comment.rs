//! Comment Operations

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Operation};
use crate::models::Comment;

pub const ADD_COMMENT: Operation = Operation {
    name: "AddComment",
    document: r#"
mutation AddComment($taskId: Int!, $content: String!, $authorEmail: String!) {
  addComment(taskId: $taskId, content: $content, authorEmail: $authorEmail) {
    comment {
      id
      content
      authorEmail
      timestamp
    }
  }
}"#,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentVars {
    pub task_id: u32,
    pub content: String,
    pub author_email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentData {
    add_comment: Option<CommentPayload>,
}

#[derive(Deserialize)]
struct CommentPayload {
    comment: Option<Comment>,
}

pub async fn add_comment(api: &ApiClient, vars: &AddCommentVars) -> Result<Comment, ApiError> {
    let data: AddCommentData = api.execute(&ADD_COMMENT, vars).await?;
    data.add_comment
        .and_then(|p| p.comment)
        .ok_or(ApiError::MissingData(ADD_COMMENT.name))
}
