pub mod database;
pub mod repositories;
pub mod upstream;

pub use database::{Database, SqlitePool};
pub use repositories::*;
pub use upstream::JikanClient;
