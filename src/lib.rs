//! Client side of account registration: a form model with per-field validation, and a
//! submission controller that posts the form to an authentication service and turns the result
//! into notifications.

pub mod client;
pub mod config;
mod env_renderer;
mod error;
pub mod form;
pub mod notification;
pub mod submission;
#[cfg(test)]
mod test_helper;
pub mod validation;

pub use api::{ErrorResponse, LoginForm, RegisterForm, RegisterResponse, User};
pub use client::{AuthService, HttpAuthService};
pub use config::{Config, Notifications};
pub use env_renderer::EnvRenderer;
pub use error::{SubmitBlocked, SubmitError};
pub use form::{Field, FormModel, UnknownField};
pub use notification::{Notification, NotificationKind};
pub use submission::{Attempt, Registration, SubmissionOutcome};
pub use validation::{FieldError, ValidationReport};
