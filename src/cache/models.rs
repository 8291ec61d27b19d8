use serde::{Deserialize, Serialize};

use crate::database::{PostRecord, VoteType};

/// 热门帖子快照，写入 Redis hash，所有字段均为字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPost {
    pub author_username: String,
    pub content: String,
    pub id: String,
    pub title: String,
    pub current_vote: VoteType,
    pub created_at: String,
}

impl CachedPost {
    pub fn from_post(post: &PostRecord, current_vote: VoteType) -> Self {
        let content = post
            .content
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "null".to_string());

        Self {
            author_username: post.author_username.clone().unwrap_or_default(),
            content,
            id: post.id.clone(),
            title: post.title.clone(),
            current_vote,
            created_at: post.created_at.to_rfc3339(),
        }
    }

    /// hash 字段列表，顺序固定
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            ("authorUsername", self.author_username.clone()),
            ("content", self.content.clone()),
            ("id", self.id.clone()),
            ("title", self.title.clone()),
            ("currentVote", self.current_vote.as_str().to_string()),
            ("createdAt", self.created_at.clone()),
        ]
    }
}
