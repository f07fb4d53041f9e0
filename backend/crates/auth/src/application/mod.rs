//! Application Layer
//!
//! Use cases and application services.

pub mod authenticator;
pub mod config;
mod credentials;
pub mod get_user;
pub mod login;
pub mod logout;
pub mod register;
pub mod update_profile;
pub mod validate_token;

// Re-exports
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use validate_token::ValidateTokenUseCase;
