pub mod entities;
pub mod errors;
pub mod forms;
pub mod list_encoding;
pub mod repositories;
pub mod services;

pub use entities::*;
pub use errors::*;
pub use forms::*;
pub use repositories::*;
pub use services::*;
