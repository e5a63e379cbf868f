pub mod sqlite_review_repository;
pub mod sqlite_session_repository;
pub mod sqlite_user_repository;

pub use sqlite_review_repository::SqliteReviewRepository;
pub use sqlite_session_repository::SqliteSessionRepository;
pub use sqlite_user_repository::SqliteUserRepository;
