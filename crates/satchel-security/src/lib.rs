//! # Satchel Security
//!
//! Password hashing and session token generation.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordHashing, PasswordService};
pub use token::generate_session_token;
