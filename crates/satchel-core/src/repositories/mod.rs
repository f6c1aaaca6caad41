//! Repository traits (ports)

pub mod session_repository;
pub mod user_repository;

pub use session_repository::{NewSession, SessionRepository};
pub use user_repository::{NewUser, UserRepository};
