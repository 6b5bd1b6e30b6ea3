use std::fmt;

use serde::{Deserialize, Serialize};

/// Public identity of a registered account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, no whitespace.
    pub handle: String,
    pub name: String,
    pub email: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub handle: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    pub fn user(&self) -> User {
        User {
            handle: self.handle.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

// Passwords must never end up in logs.
impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("password_confirmation", &"***")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Success body. Servers are expected to send `message`, but a missing one is tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
