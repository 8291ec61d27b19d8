use serde::Serialize;

use crate::database::{Vote, VoteType};

/// 得分 = UP 数 - DOWN 数
pub fn score(votes: &[Vote]) -> i64 {
    votes.iter().fold(0, |acc, vote| match vote.vote_type {
        VoteType::Up => acc + 1,
        VoteType::Down => acc - 1,
    })
}

/// 查找指定用户的投票，自然键保证最多一条
pub fn current_vote(votes: &[Vote], user_id: &str) -> Option<VoteType> {
    votes
        .iter()
        .find(|vote| vote.user_id == user_id)
        .map(|vote| vote.vote_type)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub votes_amt: i64,
    pub current_vote: Option<VoteType>,
}

impl VoteSummary {
    pub fn from_votes(votes: &[Vote], user_id: Option<&str>) -> Self {
        Self {
            votes_amt: score(votes),
            current_vote: user_id.and_then(|id| current_vote(votes, id)),
        }
    }
}
