mod handler;
mod model;

pub use handler::{post_votes, vote_comment, vote_post};
pub use model::{CommentVoteRequest, PostVoteRequest};
