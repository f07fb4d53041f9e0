//! Value Objects

pub mod email;
pub mod session_token;
pub mod user_name;

pub use email::Email;
pub use session_token::SessionToken;
pub use user_name::UserName;
