use serde::Deserialize;

use crate::database::{VoteTarget, VoteType};
use crate::routes::extract::Validate;

const MAX_ID_LEN: usize = 128;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVoteRequest {
    pub post_id: String,
    pub vote_type: VoteType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentVoteRequest {
    pub comment_id: String,
    pub vote_type: VoteType,
}

fn check_id(field: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if id.len() > MAX_ID_LEN {
        return Err(format!("{} is longer than {} bytes", field, MAX_ID_LEN));
    }
    Ok(())
}

impl Validate for PostVoteRequest {
    fn validate(&self) -> Result<(), String> {
        check_id("postId", &self.post_id)
    }
}

impl Validate for CommentVoteRequest {
    fn validate(&self) -> Result<(), String> {
        check_id("commentId", &self.comment_id)
    }
}

impl PostVoteRequest {
    pub fn target(&self) -> VoteTarget {
        VoteTarget::post(self.post_id.clone())
    }
}

impl CommentVoteRequest {
    pub fn target(&self) -> VoteTarget {
        VoteTarget::comment(self.comment_id.clone())
    }
}
