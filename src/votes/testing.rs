// 测试用的内存存储与缓存

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::cache::{CachedPost, PostCache};
use crate::database::{PostRecord, TargetKind, Vote, VoteRepository, VoteTarget, VoteType};
use crate::utils::Claims;

pub(crate) fn claims(user_id: &str) -> Claims {
    Claims {
        sub: user_id.to_string(),
        username: None,
        exp: i64::MAX,
        iat: 0,
    }
}

type NaturalKey = (TargetKind, String, String);

#[derive(Default)]
pub(crate) struct MemoryVoteRepository {
    posts: Mutex<HashMap<String, PostRecord>>,
    votes: Mutex<HashMap<NaturalKey, VoteType>>,
    calls: AtomicUsize,
    creates: AtomicUsize,
    list_calls: AtomicUsize,
    fail_writes: AtomicBool,
    // find_vote 返回的过期结果，模拟读取之后被并发修改
    stale_reads: Mutex<HashMap<NaturalKey, Option<VoteType>>>,
}

impl MemoryVoteRepository {
    pub(crate) fn with_post(post_id: &str, author: &str) -> Self {
        let repo = Self::default();
        repo.posts.lock().unwrap().insert(
            post_id.to_string(),
            PostRecord {
                id: post_id.to_string(),
                title: format!("post {}", post_id),
                content: Some(serde_json::json!({ "text": "hello" })),
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                author_username: Some(author.to_string()),
            },
        );
        repo
    }

    fn key(user_id: &str, target: &VoteTarget) -> NaturalKey {
        (target.kind, target.id.clone(), user_id.to_string())
    }

    pub(crate) fn seed_vote(&self, user_id: &str, target: &VoteTarget, vote_type: VoteType) {
        self.votes
            .lock()
            .unwrap()
            .insert(Self::key(user_id, target), vote_type);
    }

    pub(crate) fn vote_of(&self, user_id: &str, target: &VoteTarget) -> Option<VoteType> {
        self.votes
            .lock()
            .unwrap()
            .get(&Self::key(user_id, target))
            .copied()
    }

    pub(crate) fn records_for(&self, user_id: &str, target: &VoteTarget) -> usize {
        self.votes
            .lock()
            .unwrap()
            .keys()
            .filter(|key| **key == Self::key(user_id, target))
            .count()
    }

    pub(crate) fn score_of(&self, target: &VoteTarget) -> i64 {
        crate::votes::tally::score(&self.snapshot(target))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn stale_read(&self, user_id: &str, target: &VoteTarget, seen: Option<VoteType>) {
        self.stale_reads
            .lock()
            .unwrap()
            .insert(Self::key(user_id, target), seen);
    }

    fn snapshot(&self, target: &VoteTarget) -> Vec<Vote> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|((kind, id, _), _)| *kind == target.kind && *id == target.id)
            .map(|((_, id, user), vote_type)| Vote {
                user_id: user.clone(),
                target_id: id.clone(),
                vote_type: *vote_type,
            })
            .collect()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for MemoryVoteRepository {
    async fn find_post(&self, post_id: &str) -> Result<Option<PostRecord>, sqlx::Error> {
        self.record_call();
        Ok(self.posts.lock().unwrap().get(post_id).cloned())
    }

    async fn list_votes(&self, target: &VoteTarget) -> Result<Vec<Vote>, sqlx::Error> {
        self.record_call();
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot(target))
    }

    async fn find_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
    ) -> Result<Option<VoteType>, sqlx::Error> {
        self.record_call();
        if let Some(seen) = self.stale_reads.lock().unwrap().get(&Self::key(user_id, target)) {
            return Ok(*seen);
        }
        Ok(self.vote_of(user_id, target))
    }

    async fn create_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error> {
        self.record_call();
        self.check_write()?;
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.seed_vote(user_id, target, vote_type);
        Ok(())
    }

    async fn update_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error> {
        self.record_call();
        self.check_write()?;
        // 与 Postgres 的 upsert 一致：记录不存在时直接写入
        self.seed_vote(user_id, target, vote_type);
        Ok(())
    }

    async fn delete_vote(&self, user_id: &str, target: &VoteTarget) -> Result<bool, sqlx::Error> {
        self.record_call();
        self.check_write()?;
        let removed = self
            .votes
            .lock()
            .unwrap()
            .remove(&Self::key(user_id, target));
        Ok(removed.is_some())
    }
}

#[derive(Default)]
pub(crate) struct RecordingPostCache {
    entries: Mutex<HashMap<String, CachedPost>>,
    writes: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingPostCache {
    pub(crate) fn entry(&self, post_id: &str) -> Option<CachedPost> {
        self.entries.lock().unwrap().get(post_id).cloned()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostCache for RecordingPostCache {
    async fn upsert_post(&self, post: &CachedPost) -> Result<(), redis::RedisError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "cache unavailable",
            )));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(post.id.clone(), post.clone());
        Ok(())
    }
}
