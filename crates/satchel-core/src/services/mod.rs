//! Domain services (business logic)

pub mod auth_service;

pub use auth_service::{AuthService, CreateUserParams, SignInResult, UpdatePasswordParams};
