//! Interactive prompt for the initial admin account

use dialoguer::{Input, Password};

use satchel_core::{CreateUserParams, CredentialsProvider, DomainError};

/// Asks on the terminal. Only runs when the user table is empty.
pub struct TerminalPrompt;

impl CredentialsProvider for TerminalPrompt {
    fn credentials(&self) -> Result<CreateUserParams, DomainError> {
        println!("No users found. Please create the initial admin user.");

        let username: String = Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| DomainError::InternalError(format!("prompt failed: {}", e)))?;

        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
            .map_err(|e| DomainError::InternalError(format!("prompt failed: {}", e)))?;

        Ok(CreateUserParams::new(username.trim(), password.trim()))
    }
}
