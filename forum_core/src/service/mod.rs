pub mod cascade;
pub mod posts;
