//! HTTP handlers

pub mod auth;
pub mod health;
pub mod index;
pub mod me;
pub mod settings;
