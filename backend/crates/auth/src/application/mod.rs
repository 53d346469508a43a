//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod token;
pub mod uploads;
pub mod verify_token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use token::{AccessClaims, RefreshClaims, TokenIssuer};
pub use uploads::UploadStatsUseCase;
pub use verify_token::{VerifyTokenOutput, VerifyTokenUseCase};
