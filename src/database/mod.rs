// 数据库模块
// 投票记录与帖子查询

pub mod models;
pub mod repositories;

use sqlx::Executor;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

pub use models::{PostRecord, TargetKind, Vote, VoteTarget, VoteType};
pub use repositories::{PgVoteRepository, VoteRepository};

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'forum_votes';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
