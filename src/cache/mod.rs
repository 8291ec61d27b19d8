// 缓存模块
// 热门帖子快照的数据结构和写入逻辑

pub mod keys;
pub mod models;
pub mod operations;

pub use keys::post_key;
pub use models::CachedPost;
pub use operations::{PostCache, RedisPostCache};
