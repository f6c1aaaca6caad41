//! # Satchel Core
//!
//! Domain entities, repository traits and the authentication service.

pub mod clock;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod tasks;

// Re-export domain entities
pub use clock::{Clock, SystemClock};
pub use config::AuthConfig;
pub use credentials::{CredentialsProvider, StaticCredentials};
pub use domain::*;
pub use error::DomainError;
pub use services::{AuthService, CreateUserParams, SignInResult, UpdatePasswordParams};
pub use tasks::PeriodicTask;
