use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "vote_type", rename_all = "UPPERCASE")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "UP",
            VoteType::Down => "DOWN",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 投票对象类型，帖子与评论各自一张投票表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    pub fn vote_table(&self) -> &'static str {
        match self {
            TargetKind::Post => "post_votes",
            TargetKind::Comment => "comment_votes",
        }
    }

    pub fn target_column(&self) -> &'static str {
        match self {
            TargetKind::Post => "post_id",
            TargetKind::Comment => "comment_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Post => "post",
            TargetKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoteTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl VoteTarget {
    pub fn post(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Post,
            id: id.into(),
        }
    }

    pub fn comment(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Comment,
            id: id.into(),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vote {
    pub user_id: String,
    pub target_id: String,
    #[sqlx(rename = "type")]
    pub vote_type: VoteType,
}

#[derive(Debug, Clone, FromRow)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub content: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub author_username: Option<String>,
}
