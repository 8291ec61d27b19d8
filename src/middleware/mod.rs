mod auth;
mod error_handler;

pub use auth::{Session, session_middleware};
pub use error_handler::log_errors;
