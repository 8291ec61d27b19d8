use std::sync::Arc;

use crate::cache::{CachedPost, PostCache};
use crate::config::{Config, ScoreBasis};
use crate::database::{TargetKind, VoteRepository, VoteTarget, VoteType};
use crate::error::AppError;
use crate::utils::Claims;

use super::tally::{self, VoteSummary};
use super::transition::Transition;

#[derive(Debug, Clone, Copy)]
pub struct VoteSettings {
    /// 得分达到该值的帖子写入缓存
    pub cache_after_upvotes: i64,
    pub score_basis: ScoreBasis,
}

impl Default for VoteSettings {
    fn default() -> Self {
        Self {
            cache_after_upvotes: 1,
            score_basis: ScoreBasis::Post,
        }
    }
}

impl From<&Config> for VoteSettings {
    fn from(config: &Config) -> Self {
        Self {
            cache_after_upvotes: config.cache_after_upvotes,
            score_basis: config.score_basis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    pub transition: Transition,
    /// 仅帖子的新建/改投路径会计算得分
    pub score: Option<i64>,
    pub cached: bool,
}

impl VoteOutcome {
    fn uncached(transition: Transition, score: Option<i64>) -> Self {
        Self {
            transition,
            score,
            cached: false,
        }
    }
}

pub struct VoteService {
    repo: Arc<dyn VoteRepository>,
    cache: Arc<dyn PostCache>,
    settings: VoteSettings,
}

impl VoteService {
    pub fn new(
        repo: Arc<dyn VoteRepository>,
        cache: Arc<dyn PostCache>,
        settings: VoteSettings,
    ) -> Self {
        Self {
            repo,
            cache,
            settings,
        }
    }

    /// 投票、改投或撤销；帖子得分达到阈值时覆盖写入缓存快照
    pub async fn cast_vote(
        &self,
        session: Option<&Claims>,
        target: VoteTarget,
        requested: VoteType,
    ) -> Result<VoteOutcome, AppError> {
        let user_id = session.ok_or(AppError::Unauthorized)?.sub.as_str();

        // 帖子投票需要帖子存在；按变更前计分时同时读取投票集合
        let post = match target.kind {
            TargetKind::Post => {
                let post = self
                    .repo
                    .find_post(&target.id)
                    .await?
                    .ok_or(AppError::NotFound("post"))?;
                let pre_votes = match self.settings.score_basis {
                    ScoreBasis::Pre => Some(self.repo.list_votes(&target).await?),
                    ScoreBasis::Post => None,
                };
                Some((post, pre_votes))
            }
            TargetKind::Comment => None,
        };

        let existing = self.repo.find_vote(user_id, &target).await?;
        let transition = Transition::decide(existing, requested);

        match transition {
            Transition::Create(vote_type) => {
                self.repo.create_vote(user_id, &target, vote_type).await?;
            }
            Transition::Flip(vote_type) => {
                self.repo.update_vote(user_id, &target, vote_type).await?;
            }
            Transition::Retract => {
                if self.repo.delete_vote(user_id, &target).await? {
                    tracing::info!("User {} retracted vote on {}", user_id, target);
                } else {
                    tracing::debug!("Vote of {} on {} was already gone", user_id, target);
                }
                return Ok(VoteOutcome::uncached(transition, None));
            }
        }

        tracing::info!(
            "User {} voted {} on {} ({:?})",
            user_id,
            requested,
            target,
            transition
        );

        let Some((post, pre_votes)) = post else {
            return Ok(VoteOutcome::uncached(transition, None));
        };

        let score = match pre_votes {
            Some(votes) => tally::score(&votes),
            None => tally::score(&self.repo.list_votes(&target).await?),
        };

        if score < self.settings.cache_after_upvotes {
            return Ok(VoteOutcome::uncached(transition, Some(score)));
        }

        let snapshot = CachedPost::from_post(&post, requested);
        if let Err(e) = self.cache.upsert_post(&snapshot).await {
            // 投票已落库，不回滚
            tracing::warn!("Vote on {} stored but cache write failed: {}", target, e);
            return Err(e.into());
        }

        Ok(VoteOutcome {
            transition,
            score: Some(score),
            cached: true,
        })
    }

    pub async fn post_summary(
        &self,
        session: Option<&Claims>,
        post_id: &str,
    ) -> Result<VoteSummary, AppError> {
        if self.repo.find_post(post_id).await?.is_none() {
            return Err(AppError::NotFound("post"));
        }

        let votes = self.repo.list_votes(&VoteTarget::post(post_id)).await?;
        Ok(VoteSummary::from_votes(
            &votes,
            session.map(|claims| claims.sub.as_str()),
        ))
    }
}
