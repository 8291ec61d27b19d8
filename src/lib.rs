use config::Config;
use std::sync::Arc;
use votes::VoteService;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod result;
pub mod router;
pub mod routes;
pub mod utils;
pub mod votes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub votes: Arc<VoteService>,
}
