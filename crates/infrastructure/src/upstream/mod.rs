pub mod dto;
pub mod jikan_client;

pub use jikan_client::JikanClient;
