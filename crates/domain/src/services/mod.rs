pub mod credential_service;
pub mod review_service;
pub mod session_service;
pub mod user_service;

pub use credential_service::CredentialService;
pub use review_service::ReviewService;
pub use session_service::SessionService;
pub use user_service::UserService;
