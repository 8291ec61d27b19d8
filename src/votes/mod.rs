// 投票模块
// 计票、投票状态机与缓存同步

pub mod service;
pub mod tally;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use service::{VoteOutcome, VoteService, VoteSettings};
pub use tally::VoteSummary;
pub use transition::{Transition, VoteState};
