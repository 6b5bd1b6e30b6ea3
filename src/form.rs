//! The registration form model: current values, the rule table and the errors on display.

use std::{fmt, str::FromStr, sync::LazyLock};

use api::RegisterForm;
use regex::Regex;
use thiserror::Error;

use crate::validation::{FieldError, ValidationReport};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Handle,
    Password,
    PasswordConfirmation,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Handle,
        Field::Password,
        Field::PasswordConfirmation,
    ];

    /// The name used on the wire and as key in validation errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Handle => "handle",
            Field::Password => "password",
            Field::PasswordConfirmation => "password_confirmation",
        }
    }

    fn value(self, input: &RegisterForm) -> &str {
        match self {
            Field::Name => &input.name,
            Field::Email => &input.email,
            Field::Handle => &input.handle,
            Field::Password => &input.password,
            Field::PasswordConfirmation => &input.password_confirmation,
        }
    }

    fn value_mut(self, input: &mut RegisterForm) -> &mut String {
        match self {
            Field::Name => &mut input.name,
            Field::Email => &mut input.email,
            Field::Handle => &mut input.handle,
            Field::Password => &mut input.password,
            Field::PasswordConfirmation => &mut input.password_confirmation,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.into()))
    }
}

/// A rule sees the field's value and a snapshot of the whole form.
pub type Rule = fn(&str, &RegisterForm) -> Option<FieldError>;

/// Client side rules. Advisory only, the server has the final say.
pub const RULES: &[(Field, Rule)] = &[
    (Field::Name, name_rule),
    (Field::Email, email_rule),
    (Field::Handle, handle_rule),
    (Field::Password, password_rule),
    (Field::PasswordConfirmation, confirmation_rule),
];

pub const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email pattern"));

const NAME_REQUIRED: FieldError = FieldError::new("required", "name is required");
const EMAIL_REQUIRED: FieldError = FieldError::new("required", "email is required");
const EMAIL_INVALID: FieldError = FieldError::new("email", "invalid email");
const HANDLE_REQUIRED: FieldError = FieldError::new("required", "handle is required");
const PASSWORD_REQUIRED: FieldError = FieldError::new("required", "password is required");
const PASSWORD_TOO_SHORT: FieldError =
    FieldError::new("length", "password must be at least 8 characters");
const CONFIRMATION_REQUIRED: FieldError =
    FieldError::new("required", "confirmation is required");
const PASSWORDS_DIFFER: FieldError = FieldError::new("must_match", "passwords do not match");

fn name_rule(value: &str, _: &RegisterForm) -> Option<FieldError> {
    value.is_empty().then_some(NAME_REQUIRED)
}

fn email_rule(value: &str, _: &RegisterForm) -> Option<FieldError> {
    if value.is_empty() {
        return Some(EMAIL_REQUIRED);
    }
    (!EMAIL_PATTERN.is_match(value)).then_some(EMAIL_INVALID)
}

fn handle_rule(value: &str, _: &RegisterForm) -> Option<FieldError> {
    value.is_empty().then_some(HANDLE_REQUIRED)
}

fn password_rule(value: &str, _: &RegisterForm) -> Option<FieldError> {
    if value.is_empty() {
        return Some(PASSWORD_REQUIRED);
    }
    (value.chars().count() < PASSWORD_MIN_LENGTH).then_some(PASSWORD_TOO_SHORT)
}

fn confirmation_rule(value: &str, form: &RegisterForm) -> Option<FieldError> {
    if value.is_empty() {
        return Some(CONFIRMATION_REQUIRED);
    }
    (value != form.password).then_some(PASSWORDS_DIFFER)
}

fn check(field: Field, input: &RegisterForm) -> Option<FieldError> {
    RULES
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, rule)| rule(field.value(input), input))
}

/// Runs every rule against `input`. Fields are checked independently.
pub fn validate(input: &RegisterForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (field, rule) in RULES {
        if let Some(error) = rule(field.value(input), input) {
            report.insert(*field, error);
        }
    }
    report
}

#[derive(Debug, Default)]
pub struct FormModel {
    input: RegisterForm,
    /// Errors of the last `validate()`. `None` until validation ran once.
    displayed: Option<ValidationReport>,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: RegisterForm) -> Self {
        Self {
            input,
            displayed: None,
        }
    }

    pub fn input(&self) -> &RegisterForm {
        &self.input
    }

    pub fn value(&self, field: Field) -> &str {
        field.value(&self.input)
    }

    pub fn snapshot(&self) -> RegisterForm {
        self.input.clone()
    }

    /// Updates one field. Once errors are on display, the field is re-checked, and a change
    /// to either password re-checks the confirmation.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *field.value_mut(&mut self.input) = value.into();
        tracing::debug!(%field, "form field changed");

        let Some(displayed) = &self.displayed else {
            return;
        };

        let rerun = |f: Field| {
            f == field
                || (f == Field::PasswordConfirmation
                    && matches!(field, Field::Password | Field::PasswordConfirmation))
        };

        let mut report = ValidationReport::default();
        for f in Field::ALL {
            let error = if rerun(f) {
                check(f, &self.input)
            } else {
                displayed.get(f)
            };
            if let Some(error) = error {
                report.insert(f, error);
            }
        }
        self.displayed = Some(report);
    }

    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Runs all rules and puts the result on display.
    pub fn validate(&mut self) -> ValidationReport {
        let report = validate(&self.input);
        self.displayed = Some(report.clone());
        report
    }

    /// The errors currently shown next to the fields.
    pub fn errors(&self) -> ValidationReport {
        self.displayed.clone().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::test_helper::ana;

    #[rstest]
    fn scenario_a_is_valid(ana: RegisterForm) {
        let mut form = FormModel::with_input(ana);
        assert!(form.validate().is_valid());
        assert!(form.errors().is_valid());
    }

    #[rstest]
    fn scenario_b_reports_mismatch_only(ana: RegisterForm) {
        let mut form = FormModel::with_input(ana);
        form.set_field(Field::PasswordConfirmation, "different");

        let report = form.validate();
        assert_eq!(
            report.fields().collect::<Vec<_>>(),
            vec![Field::PasswordConfirmation]
        );
        assert_eq!(
            report.message(Field::PasswordConfirmation),
            Some("passwords do not match")
        );
    }

    #[test]
    fn empty_form_reports_every_field() {
        let report = FormModel::new().validate();
        assert_eq!(report.message(Field::Name), Some("name is required"));
        assert_eq!(report.message(Field::Email), Some("email is required"));
        assert_eq!(report.message(Field::Handle), Some("handle is required"));
        assert_eq!(report.message(Field::Password), Some("password is required"));
        assert_eq!(
            report.message(Field::PasswordConfirmation),
            Some("confirmation is required")
        );
    }

    #[rstest]
    #[case(Field::Name)]
    #[case(Field::Email)]
    #[case(Field::Handle)]
    #[case(Field::Password)]
    #[case(Field::PasswordConfirmation)]
    fn any_empty_field_is_required(ana: RegisterForm, #[case] field: Field) {
        let mut form = FormModel::with_input(ana);
        form.set_field(field, "");
        let report = form.validate();
        assert_eq!(report.code(field), Some("required"));
    }

    #[rstest]
    #[case("a", true)]
    #[case("1234567", true)]
    #[case("12345678", false)]
    #[case("a much longer password", false)]
    fn password_length(#[case] password: &str, #[case] too_short: bool) {
        let input = RegisterForm {
            password: password.into(),
            ..Default::default()
        };
        let report = validate(&input);
        assert_eq!(report.code(Field::Password) == Some("length"), too_short);
    }

    #[rstest]
    #[case("password1", "password1", false)]
    #[case("password1", "password2", true)]
    #[case("password1", "Password1", true)]
    #[case("password1", "password1 ", true)]
    #[case("", "x", true)]
    fn confirmation_matches_password(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] mismatch: bool,
    ) {
        let input = RegisterForm {
            password: password.into(),
            password_confirmation: confirmation.into(),
            ..Default::default()
        };
        let report = validate(&input);
        assert_eq!(
            report.code(Field::PasswordConfirmation) == Some("must_match"),
            mismatch
        );
    }

    #[rstest]
    #[case("ana@test.com", true)]
    #[case("a@b.c", true)]
    #[case("ana.test@mail.example.org", true)]
    #[case("ana", false)]
    #[case("ana@test", false)]
    #[case("@test.com", false)]
    #[case("ana@.com", false)]
    #[case("ana @ test . com", false)]
    fn email_pattern(#[case] email: &str, #[case] valid: bool) {
        let input = RegisterForm {
            email: email.into(),
            ..Default::default()
        };
        let report = validate(&input);
        assert_eq!(report.message(Field::Email).is_none(), valid);
        if !valid {
            assert_eq!(report.message(Field::Email), Some("invalid email"));
        }
    }

    #[test]
    fn no_errors_displayed_before_first_validation() {
        let mut form = FormModel::new();
        form.set_field(Field::Email, "nope");
        assert!(form.errors().is_valid());
    }

    #[rstest]
    fn editing_password_rechecks_confirmation(ana: RegisterForm) {
        let mut form = FormModel::with_input(ana);
        form.set_field(Field::Name, "");
        form.validate();

        form.set_field(Field::Password, "another-password");
        let errors = form.errors();
        assert_eq!(
            errors.message(Field::PasswordConfirmation),
            Some("passwords do not match")
        );
        // Untouched fields keep their displayed errors.
        assert_eq!(errors.message(Field::Name), Some("name is required"));

        form.set_field(Field::PasswordConfirmation, "another-password");
        assert_eq!(form.errors().message(Field::PasswordConfirmation), None);

        form.set_field(Field::Name, "Ana");
        assert!(form.errors().is_valid());
    }

    #[rstest]
    fn reset_clears_values_and_errors(ana: RegisterForm) {
        let mut form = FormModel::with_input(ana);
        form.set_field(Field::Email, "broken");
        form.validate();

        form.reset();
        assert!(Field::ALL.into_iter().all(|field| form.value(field).is_empty()));
        assert!(form.errors().is_valid());
    }

    #[test]
    fn fields_parse_from_wire_names() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }

        let mut form = FormModel::new();
        assert!(form.set_field_by_name("handle", "ana").is_ok());
        assert_eq!(form.value(Field::Handle), "ana");
        assert_eq!(
            form.set_field_by_name("nickname", "x"),
            Err(UnknownField("nickname".into()))
        );
    }
}
