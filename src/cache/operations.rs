use std::sync::Arc;

use async_trait::async_trait;
use redis::Client as RedisClient;

use super::keys::post_key;
use super::models::CachedPost;

/// 帖子快照缓存，只写不读
#[async_trait]
pub trait PostCache: Send + Sync {
    async fn upsert_post(&self, post: &CachedPost) -> Result<(), redis::RedisError>;
}

pub struct RedisPostCache {
    redis: Arc<RedisClient>,
}

impl RedisPostCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl PostCache for RedisPostCache {
    async fn upsert_post(&self, post: &CachedPost) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let key = post_key(&post.id);

        // 整体覆盖：先删后写，放在同一个事务里
        let _: () = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &post.fields())
            .ignore()
            .query_async(&mut conn)
            .await?;

        tracing::debug!("Set post snapshot to cache: {}", key);
        Ok(())
    }
}
