use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{PostRecord, Vote, VoteTarget, VoteType};

/// 投票记录存储，按 (用户, 对象) 自然键访问
#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn find_post(&self, post_id: &str) -> Result<Option<PostRecord>, sqlx::Error>;

    async fn list_votes(&self, target: &VoteTarget) -> Result<Vec<Vote>, sqlx::Error>;

    async fn find_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
    ) -> Result<Option<VoteType>, sqlx::Error>;

    async fn create_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error>;

    /// 改投；记录已被并发删除时按新建处理，保证结果状态与请求一致
    async fn update_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error>;

    /// 返回是否真的删除了记录
    async fn delete_vote(&self, user_id: &str, target: &VoteTarget) -> Result<bool, sqlx::Error>;
}

pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 新建与改投共用：以自然键冲突合并，并发删除或重复创建都收敛到请求的方向
    async fn upsert_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO {table} (user_id, {col}, type)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, {col}) DO UPDATE SET type = EXCLUDED.type
            "#,
            col = target.kind.target_column(),
            table = target.kind.vote_table(),
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(&target.id)
            .bind(vote_type)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    async fn find_post(&self, post_id: &str) -> Result<Option<PostRecord>, sqlx::Error> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, u.username AS author_username
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_votes(&self, target: &VoteTarget) -> Result<Vec<Vote>, sqlx::Error> {
        let sql = format!(
            "SELECT user_id, {col} AS target_id, type FROM {table} WHERE {col} = $1",
            col = target.kind.target_column(),
            table = target.kind.vote_table(),
        );

        sqlx::query_as::<_, Vote>(&sql)
            .bind(&target.id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
    ) -> Result<Option<VoteType>, sqlx::Error> {
        let sql = format!(
            "SELECT type FROM {table} WHERE user_id = $1 AND {col} = $2",
            col = target.kind.target_column(),
            table = target.kind.vote_table(),
        );

        sqlx::query_scalar::<_, VoteType>(&sql)
            .bind(user_id)
            .bind(&target.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error> {
        self.upsert_vote(user_id, target, vote_type).await
    }

    async fn update_vote(
        &self,
        user_id: &str,
        target: &VoteTarget,
        vote_type: VoteType,
    ) -> Result<(), sqlx::Error> {
        self.upsert_vote(user_id, target, vote_type).await
    }

    async fn delete_vote(&self, user_id: &str, target: &VoteTarget) -> Result<bool, sqlx::Error> {
        let sql = format!(
            "DELETE FROM {table} WHERE user_id = $1 AND {col} = $2",
            col = target.kind.target_column(),
            table = target.kind.vote_table(),
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(&target.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
