pub mod extract;
pub mod vote;
