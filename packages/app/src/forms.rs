//! Form state for the login, sign-up and create-task screens.

use std::sync::OnceLock;

use regex::Regex;
use store::Priority;

pub const INVALID_EMAIL: &str = "Invalid email format";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
        )
        .expect("email pattern is valid")
    })
}

/// Check an email address, returning the message to show when it is malformed.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(INVALID_EMAIL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.error = validate_email(&self.email).err().map(str::to_string);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// First failing check, email before passwords.
    pub error: Option<String>,
}

impl SignUpForm {
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.revalidate();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.revalidate();
    }

    pub fn set_confirm_password(&mut self, password: impl Into<String>) {
        self.confirm_password = password.into();
        self.revalidate();
    }

    /// An empty field is not checked yet.
    fn revalidate(&mut self) {
        let email = (!self.email.is_empty())
            .then(|| validate_email(&self.email).err())
            .flatten();
        let passwords = (!self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password != self.confirm_password)
            .then_some(PASSWORDS_MUST_MATCH);
        self.error = email.or(passwords).map(str::to_string);
    }

    pub fn can_submit(&self) -> bool {
        !self.email.is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.error.is_none()
    }
}

/// State of the create-task panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub description: String,
    pub priority: Option<Priority>,
    pub open: bool,
}

impl TaskForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clear the inputs and close the panel.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("first.last+tag@mail-server.io").is_ok());
        assert_eq!(validate_email("ana@example"), Err(INVALID_EMAIL));
        assert_eq!(validate_email("ana.example.com"), Err(INVALID_EMAIL));
        // Only lowercase is accepted, and a single TLD segment.
        assert!(validate_email("Ana@example.com").is_err());
        assert!(validate_email("ana@mail.example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_login_form() {
        let mut form = LoginForm::default();
        assert!(!form.can_submit());

        form.set_email("not-an-email");
        form.set_password("pw");
        assert_eq!(form.error.as_deref(), Some(INVALID_EMAIL));
        assert!(!form.can_submit());

        form.set_email("ana@example.com");
        assert!(form.error.is_none());
        assert!(form.can_submit());
    }

    #[test]
    fn test_sign_up_password_match() {
        let mut form = SignUpForm::default();
        form.set_email("ana@example.com");

        // No mismatch reported until the other field has a value
        form.set_password("secret");
        assert!(form.error.is_none());

        form.set_confirm_password("secre");
        assert_eq!(form.error.as_deref(), Some(PASSWORDS_MUST_MATCH));
        assert!(!form.can_submit());

        form.set_confirm_password("secret");
        assert!(form.error.is_none());
        assert!(form.can_submit());

        form.set_password("changed");
        assert_eq!(form.error.as_deref(), Some(PASSWORDS_MUST_MATCH));
    }

    #[test]
    fn test_sign_up_keeps_email_error() {
        let mut form = SignUpForm::default();
        form.set_email("not-an-email");
        form.set_password("pw");
        form.set_confirm_password("pw");
        assert_eq!(form.error.as_deref(), Some(INVALID_EMAIL));
        assert!(!form.can_submit());

        // Email error wins over a mismatch; fixing it reveals the mismatch
        form.set_confirm_password("px");
        assert_eq!(form.error.as_deref(), Some(INVALID_EMAIL));
        form.set_email("ana@example.com");
        assert_eq!(form.error.as_deref(), Some(PASSWORDS_MUST_MATCH));

        form.set_confirm_password("pw");
        assert!(form.error.is_none());
        assert!(form.can_submit());
    }

    #[test]
    fn test_task_form_reset() {
        let mut form = TaskForm::default();
        form.open();
        form.description = "Call mom".into();
        form.priority = Some(Priority::High);
        form.reset();
        assert_eq!(form, TaskForm::default());
        assert!(!form.open);
    }
}
