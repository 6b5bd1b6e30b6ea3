//! What the user currently sees of a submission.

use std::time::Duration;

use crate::{config::Notifications, submission::SubmissionOutcome};

pub const LOADING_MESSAGE: &str = "Creating user...";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: Option<String>,
    /// `None` stays visible until replaced.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn from_outcome(outcome: &SubmissionOutcome, durations: &Notifications) -> Self {
        match outcome {
            SubmissionOutcome::Pending => Self {
                kind: NotificationKind::Loading,
                message: LOADING_MESSAGE.into(),
                description: None,
                duration: None,
            },
            SubmissionOutcome::Success {
                message,
                description,
            } => Self {
                kind: NotificationKind::Success,
                message: message.clone(),
                description: Some(description.clone()),
                duration: Some(durations.effective_success_duration()),
            },
            SubmissionOutcome::Failure {
                message,
                description,
            } => Self {
                kind: NotificationKind::Error,
                message: message.clone(),
                description: Some(description.clone()),
                duration: Some(durations.effective_error_duration()),
            },
        }
    }
}
