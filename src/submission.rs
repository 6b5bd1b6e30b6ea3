//! One registration form session: the form, the outcome of its latest submission and what the
//! user should be seeing because of it.
//!
//! A submission is split into [`Registration::begin`] and [`Registration::complete`] so it can be
//! driven by futures, callbacks or channels alike. [`Registration::submit`] drives both over an
//! [`AuthService`].

use api::{RegisterForm, RegisterResponse};

use crate::{
    client::AuthService,
    config::Notifications,
    error::{SubmitBlocked, SubmitError},
    form::{Field, FormModel},
    notification::Notification,
};

pub const FAILURE_MESSAGE: &str = "Registration error";
pub const UNREACHABLE_DESCRIPTION: &str = "could not reach server";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Account created";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Success { message: String, description: String },
    Failure { message: String, description: String },
}

impl SubmissionOutcome {
    fn success(input: &RegisterForm, response: &RegisterResponse) -> Self {
        let message = if response.message.is_empty() {
            DEFAULT_SUCCESS_MESSAGE.into()
        } else {
            response.message.clone()
        };
        Self::Success {
            message,
            description: format!("User {} has been registered successfully", input.name),
        }
    }

    fn failure(error: &SubmitError) -> Self {
        Self::Failure {
            message: FAILURE_MESSAGE.into(),
            description: error
                .server_error()
                .unwrap_or(UNREACHABLE_DESCRIPTION)
                .into(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// An issued registration request. Carries the input as it was when submitted.
#[derive(Debug)]
#[must_use]
pub struct Attempt {
    input: RegisterForm,
}

impl Attempt {
    pub fn input(&self) -> &RegisterForm {
        &self.input
    }
}

#[derive(Debug, Default)]
pub struct Registration {
    form: FormModel,
    outcome: Option<SubmissionOutcome>,
    notifications: Notifications,
}

impl Registration {
    pub fn new(notifications: Notifications) -> Self {
        Self {
            notifications,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    /// The form stays editable while a submission is pending.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.outcome
            .as_ref()
            .is_some_and(SubmissionOutcome::is_pending)
    }

    /// The notification for the latest submission, if there was one.
    pub fn notification(&self) -> Option<Notification> {
        self.outcome
            .as_ref()
            .map(|outcome| Notification::from_outcome(outcome, &self.notifications))
    }

    /// Validates the form and, if it is valid, moves to `Pending`.
    ///
    /// While a submission is pending, further triggers are refused and leave everything as is.
    pub fn begin(&mut self) -> Result<Attempt, SubmitBlocked> {
        if self.is_pending() {
            tracing::debug!("Submission already in progress, ignoring trigger");
            return Err(SubmitBlocked::InFlight);
        }

        let report = self.form.validate();
        if !report.is_valid() {
            tracing::debug!(fields = ?report.fields().collect::<Vec<_>>(), "Form is invalid");
            return Err(SubmitBlocked::Invalid(report));
        }

        let input = self.form.snapshot();
        tracing::info!(handle = %input.handle, "Submitting registration");
        self.outcome = Some(SubmissionOutcome::Pending);
        Ok(Attempt { input })
    }

    /// Applies the result of `attempt`. A success resets the form, a failure keeps it for
    /// correction.
    pub fn complete(
        &mut self,
        attempt: Attempt,
        result: Result<RegisterResponse, SubmitError>,
    ) -> &SubmissionOutcome {
        let outcome = match &result {
            Ok(response) => {
                tracing::info!(handle = %attempt.input.handle, "Registration succeeded");
                self.form.reset();
                SubmissionOutcome::success(&attempt.input, response)
            }
            Err(e) => {
                tracing::warn!(handle = %attempt.input.handle, "Registration failed: {e}");
                SubmissionOutcome::failure(e)
            }
        };
        self.outcome.insert(outcome)
    }

    pub async fn submit<S>(&mut self, service: &S) -> Result<&SubmissionOutcome, SubmitBlocked>
    where
        S: AuthService + ?Sized,
    {
        let attempt = self.begin()?;
        let result = service.register(attempt.input()).await;
        Ok(self.complete(attempt, result))
    }
}
