use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use forum_votes::{
    AppState,
    cache::RedisPostCache,
    config::Config,
    database::{self, PgVoteRepository},
    router::build_router,
    votes::{VoteService, VoteSettings},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 数据库连接池与迁移
    let pool = database::connect(&config)
        .await
        .expect("Failed to connect to Postgres");

    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");

    let settings = VoteSettings::from(&config);
    tracing::info!(
        "Caching posts at score >= {} ({:?}-mutation scoring)",
        settings.cache_after_upvotes,
        settings.score_basis
    );

    let votes = VoteService::new(
        Arc::new(PgVoteRepository::new(pool)),
        Arc::new(RedisPostCache::new(Arc::new(redis_client))),
        settings,
    );

    let state = AppState {
        config: config.clone(),
        votes: Arc::new(votes),
    };

    let app = build_router(state);

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
