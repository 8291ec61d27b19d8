/// 热门帖子缓存键前缀
const POST_PREFIX: &str = "post:";

/// 生成帖子快照缓存键
pub fn post_key(post_id: &str) -> String {
    format!("{}{}", POST_PREFIX, post_id)
}
