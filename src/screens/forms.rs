use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::session::{SessionContext, UserIdentity};
use crate::utils::errors::AppError;

/// Measured in UTF-16 code units.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Screen a form hands the user over to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    Signup
}

/// Short-lived inline message shown over the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    fn new(message: impl Into<String>) -> Self {
        Notification { message: message.into() }
    }
}

#[derive(Debug)]
pub enum FormOutcome {
    Success {
        notification: Notification,
        navigate_to: Destination,
        identity: UserIdentity,
    },
    Failure {
        notification: Notification,
        error: AppError,
    },
    /// A request from this form was still outstanding; nothing was sent.
    Ignored
}

impl FormOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            FormOutcome::Success { notification, .. } | FormOutcome::Failure { notification, .. } => Some(notification),
            FormOutcome::Ignored => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Success { .. })
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation("Please enter email and password".to_string()));
    }
    Ok(())
}

pub fn validate_signup(email: &str, password: &str, confirm_password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.trim().is_empty() || confirm_password.trim().is_empty() {
        return Err(AppError::Validation("Please fill all fields".to_string()));
    }
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH)));
    }
    Ok(())
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct FormCopy {
    success: &'static str,
    failure_fallback: &'static str,
    navigate_to: Destination,
}

async fn submit<R, F>(
    busy: &AtomicBool,
    validation: Result<(), AppError>,
    request: R,
    copy: FormCopy
) -> FormOutcome
where
    R: FnOnce() -> F,
    F: Future<Output = Result<UserIdentity, AppError>>,
{
    let _guard = match BusyGuard::acquire(busy) {
        Some(guard) => guard,
        None => return FormOutcome::Ignored,
    };

    if let Err(error) = validation {
        return FormOutcome::Failure {
            notification: Notification::new(error.message_or(copy.failure_fallback)),
            error,
        };
    }

    match request().await {
        Ok(identity) => FormOutcome::Success {
            notification: Notification::new(copy.success),
            navigate_to: copy.navigate_to,
            identity,
        },
        Err(error) => FormOutcome::Failure {
            notification: Notification::new(error.message_or(copy.failure_fallback)),
            error,
        },
    }
}

pub struct LoginForm {
    session: Arc<dyn SessionContext>,
    busy: AtomicBool,
}

impl LoginForm {

    pub fn new(session: Arc<dyn SessionContext>) -> Self {
        LoginForm { session, busy: AtomicBool::new(false) }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_busy() { "Logging in..." } else { "Login" }
    }

    pub async fn submit(&self, email: &str, password: &str) -> FormOutcome {
        let email = email.trim();
        let outcome = submit(
            &self.busy,
            validate_login(email, password),
            || self.session.sign_in(email, password),
            FormCopy {
                success: "Login successful",
                failure_fallback: "Login failed",
                navigate_to: Destination::Home,
            },
        ).await;

        match &outcome {
            FormOutcome::Success { identity, .. } => log::info!("User {} signed in", identity.uid),
            FormOutcome::Failure { error, .. } => log::warn!("Login rejected: {}", error),
            FormOutcome::Ignored => log::debug!("Login submit ignored while busy"),
        }
        outcome
    }
}

pub struct SignupForm {
    session: Arc<dyn SessionContext>,
    busy: AtomicBool,
}

impl SignupForm {

    pub fn new(session: Arc<dyn SessionContext>) -> Self {
        SignupForm { session, busy: AtomicBool::new(false) }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_busy() { "Creating account..." } else { "Sign Up" }
    }

    pub async fn submit(&self, email: &str, password: &str, confirm_password: &str) -> FormOutcome {
        let email = email.trim();
        let outcome = submit(
            &self.busy,
            validate_signup(email, password, confirm_password),
            || self.session.sign_up(email, password),
            FormCopy {
                success: "Account created successfully",
                failure_fallback: "Signup failed",
                navigate_to: Destination::Login,
            },
        ).await;

        match &outcome {
            FormOutcome::Success { identity, .. } => log::info!("Account {} created", identity.uid),
            FormOutcome::Failure { error, .. } => log::warn!("Signup rejected: {}", error),
            FormOutcome::Ignored => log::debug!("Signup submit ignored while busy"),
        }
        outcome
    }
}
