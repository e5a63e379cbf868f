pub mod anime_catalog;
pub mod review_repository;
pub mod session_repository;
pub mod user_repository;

pub use anime_catalog::AnimeCatalog;
pub use review_repository::ReviewRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use anime_catalog::MockAnimeCatalog;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
