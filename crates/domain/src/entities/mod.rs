pub mod genre;
pub mod review;
pub mod session;
pub mod user;

pub use genre::*;
pub use review::*;
pub use session::*;
pub use user::*;
