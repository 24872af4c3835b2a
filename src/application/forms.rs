use crate::domain::ports::{FormPosterBox, PostStatus};
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::error::{CheckoutError, Result};
use serde::Serialize;
use std::time::Duration;

/// The non-checkout form stubs. Each form validates locally, waits out a
/// fixed countdown, then makes one best-effort POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Signup,
    Login,
    PasswordReset,
    Refund,
}

impl FormKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            FormKind::Contact => "/contact",
            FormKind::Signup => "/signup",
            FormKind::Login => "/login",
            FormKind::PasswordReset => "/forgot-password",
            FormKind::Refund => "/refund",
        }
    }

    /// UX pacing before the request goes out. Not a concurrency
    /// primitive, just a timer-gated call.
    pub fn countdown(&self) -> Duration {
        match self {
            FormKind::Contact | FormKind::Refund => Duration::from_secs(3),
            FormKind::Signup | FormKind::Login | FormKind::PasswordReset => Duration::from_secs(5),
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            FormKind::Contact => {
                "Thanks! We received your message and will get back to you within 1 business day."
            }
            FormKind::Signup => "Account created! Check your inbox to verify your email.",
            FormKind::Login => "Signed in successfully.",
            FormKind::PasswordReset => "If that address exists, a reset link is on its way.",
            FormKind::Refund => "Refund request received. We'll review it within 3 business days.",
        }
    }
}

/// Raw form input shared across the five form kinds; each kind validates
/// only the fields it uses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub terms: bool,
}

// Deliberately loose: enough to catch obviously malformed addresses
// without pulling in a full RFC parser.
fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

impl LeadForm {
    pub fn validate(&self, kind: FormKind) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let require_name = |errors: &mut Vec<FieldError>| {
            if self.first_name.trim().is_empty() {
                errors.push(FieldError::new("first_name", "First name is required"));
            } else if self.first_name.len() < 2 {
                errors.push(FieldError::new(
                    "first_name",
                    "First name must be at least 2 characters",
                ));
            }
            if self.last_name.trim().is_empty() {
                errors.push(FieldError::new("last_name", "Last name is required"));
            } else if self.last_name.len() < 2 {
                errors.push(FieldError::new(
                    "last_name",
                    "Last name must be at least 2 characters",
                ));
            }
        };
        let require_email = |errors: &mut Vec<FieldError>, email: &str| {
            if email.trim().is_empty() {
                errors.push(FieldError::new("email", "Email is required"));
            } else if !valid_email(email) {
                errors.push(FieldError::new(
                    "email",
                    "Please enter a valid email address",
                ));
            }
        };

        match kind {
            FormKind::Contact => {
                require_name(&mut errors);
                require_email(&mut errors, &self.email);
                if self.subject.trim().is_empty() {
                    errors.push(FieldError::new("subject", "Subject is required"));
                }
                if self.message.trim().is_empty() {
                    errors.push(FieldError::new("message", "Message is required"));
                } else if self.message.len() < 10 {
                    errors.push(FieldError::new(
                        "message",
                        "Message must be at least 10 characters",
                    ));
                }
                if !self.terms {
                    errors.push(FieldError::new("terms", "You must agree to the terms"));
                }
            }
            FormKind::Signup => {
                require_name(&mut errors);
                require_email(&mut errors, &self.email);
                if self.password.is_empty() {
                    errors.push(FieldError::new("password", "Password is required"));
                } else if self.password.len() < 8 {
                    errors.push(FieldError::new(
                        "password",
                        "Password must be at least 8 characters",
                    ));
                }
                if self.confirm_password.is_empty() {
                    errors.push(FieldError::new(
                        "confirm_password",
                        "Please confirm your password",
                    ));
                } else if self.password != self.confirm_password {
                    errors.push(FieldError::new("confirm_password", "Passwords do not match"));
                }
            }
            FormKind::Login => {
                require_email(&mut errors, &self.email);
                if self.password.is_empty() {
                    errors.push(FieldError::new("password", "Password is required"));
                }
            }
            FormKind::PasswordReset => {
                require_email(&mut errors, &self.email);
            }
            FormKind::Refund => {
                require_email(&mut errors, &self.email);
                if self.message.trim().is_empty() {
                    errors.push(FieldError::new("message", "Reason is required"));
                } else if self.message.len() < 10 {
                    errors.push(FieldError::new(
                        "message",
                        "Reason must be at least 10 characters",
                    ));
                }
                if !self.terms {
                    errors.push(FieldError::new("terms", "You must agree to the terms"));
                }
            }
        }

        errors
    }
}

/// Reply surfaced to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReply {
    pub message: String,
}

/// Runs the lead-form stubs against a best-effort poster.
///
/// These forms are demo stubs: the backend does not exist, so a rejected
/// or unreachable endpoint is still reported as success. The contact and
/// refund forms carry two deliberate exceptions for demos: a message
/// containing "fail" forces a rejection, and rejected responses fail
/// randomly 10% of the time. The auth forms never fail past validation.
pub struct LeadFormService {
    poster: FormPosterBox,
    pacing: bool,
    flaky_rate: f64,
}

impl LeadFormService {
    pub fn new(poster: FormPosterBox) -> Self {
        Self {
            poster,
            pacing: true,
            flaky_rate: 0.1,
        }
    }

    /// Disables the countdown and the simulated flakiness. For tests.
    pub fn without_pacing(mut self) -> Self {
        self.pacing = false;
        self.flaky_rate = 0.0;
        self
    }

    pub async fn submit(&self, kind: FormKind, form: &LeadForm) -> Result<FormReply> {
        let errors = form.validate(kind);
        if !errors.is_empty() {
            return Err(ValidationErrors(errors).into());
        }

        if self.pacing {
            let mut remaining = kind.countdown().as_secs();
            while remaining > 0 {
                tracing::debug!(endpoint = kind.endpoint(), remaining, "submitting in");
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining -= 1;
            }
        }

        let body = serde_json::to_value(form)?;
        let status = self.poster.post(kind.endpoint(), &body).await;
        tracing::debug!(endpoint = kind.endpoint(), ?status, "form posted");

        // Only the contact and refund stubs simulate failures; the auth
        // stubs report success no matter what the endpoint said.
        let simulates_failure = matches!(kind, FormKind::Contact | FormKind::Refund);
        let fail_trigger = simulates_failure && form.message.to_lowercase().contains("fail");

        match status {
            Ok(PostStatus::Accepted) => Ok(FormReply {
                message: kind.success_message().to_string(),
            }),
            Ok(PostStatus::Rejected) => {
                if fail_trigger {
                    return Err(CheckoutError::FormRejected(
                        "Server validation failed. Please check your input.".to_string(),
                    ));
                }
                if simulates_failure
                    && self.flaky_rate > 0.0
                    && rand::random::<f64>() < self.flaky_rate
                {
                    return Err(CheckoutError::FormRejected(
                        "Network error. Please try again later.".to_string(),
                    ));
                }
                // No real backend exists; a 404 is a demo success.
                Ok(FormReply {
                    message: kind.success_message().to_string(),
                })
            }
            Err(_) => {
                if fail_trigger {
                    return Err(CheckoutError::FormRejected(
                        "Server validation failed. Please check your input.".to_string(),
                    ));
                }
                // Network and CORS errors are swallowed the same way.
                Ok(FormReply {
                    message: kind.success_message().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Poster that records calls and replies with a fixed status.
    #[derive(Clone)]
    struct StubPoster {
        status: Option<PostStatus>,
        calls: Arc<AtomicUsize>,
    }

    impl StubPoster {
        fn new(status: Option<PostStatus>) -> Self {
            Self {
                status,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl crate::domain::ports::FormPoster for StubPoster {
        async fn post(&self, _path: &str, _body: &serde_json::Value) -> io::Result<PostStatus> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Ok(status),
                None => Err(io::Error::other("connection refused")),
            }
        }
    }

    fn contact_form() -> LeadForm {
        LeadForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@school.edu".to_string(),
            subject: "Pricing question".to_string(),
            message: "How do academic licenses work?".to_string(),
            terms: true,
            ..LeadForm::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_form_never_posts() {
        let poster = StubPoster::new(Some(PostStatus::Accepted));
        let calls = poster.calls.clone();
        let service = LeadFormService::new(Box::new(poster)).without_pacing();

        let mut form = contact_form();
        form.email = "not-an-email".to_string();
        let result = service.submit(FormKind::Contact, &form).await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_post_is_demo_success() {
        let service =
            LeadFormService::new(Box::new(StubPoster::new(Some(PostStatus::Rejected))))
                .without_pacing();
        let reply = service
            .submit(FormKind::Contact, &contact_form())
            .await
            .unwrap();
        assert!(reply.message.starts_with("Thanks!"));
    }

    #[tokio::test]
    async fn test_network_error_is_swallowed() {
        let service = LeadFormService::new(Box::new(StubPoster::new(None))).without_pacing();
        let reply = service
            .submit(FormKind::Refund, &refund_form())
            .await
            .unwrap();
        assert!(!reply.message.is_empty());
    }

    #[tokio::test]
    async fn test_fail_trigger_forces_rejection() {
        let service =
            LeadFormService::new(Box::new(StubPoster::new(Some(PostStatus::Rejected))))
                .without_pacing();
        let mut form = contact_form();
        form.message = "please FAIL this one".to_string();

        let result = service.submit(FormKind::Contact, &form).await;
        assert!(matches!(result, Err(CheckoutError::FormRejected(_))));
    }

    #[tokio::test]
    async fn test_auth_forms_never_fail_past_validation() {
        // Rejecting endpoint, flakiness armed to fire every time, and a
        // "fail" trigger in the message: none of it applies to auth forms.
        let mut service =
            LeadFormService::new(Box::new(StubPoster::new(Some(PostStatus::Rejected))))
                .without_pacing();
        service.flaky_rate = 1.0;

        let login = LeadForm {
            email: "jane@school.edu".to_string(),
            password: "longenough8".to_string(),
            message: "this will fail".to_string(),
            ..LeadForm::default()
        };
        let signup = LeadForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@school.edu".to_string(),
            password: "longenough8".to_string(),
            confirm_password: "longenough8".to_string(),
            ..LeadForm::default()
        };
        let reset = LeadForm {
            email: "jane@school.edu".to_string(),
            ..LeadForm::default()
        };

        assert!(service.submit(FormKind::Login, &login).await.is_ok());
        assert!(service.submit(FormKind::Signup, &signup).await.is_ok());
        assert!(service.submit(FormKind::PasswordReset, &reset).await.is_ok());
    }

    #[tokio::test]
    async fn test_contact_flake_applies_on_rejection() {
        let mut service =
            LeadFormService::new(Box::new(StubPoster::new(Some(PostStatus::Rejected))))
                .without_pacing();
        service.flaky_rate = 1.0;

        let result = service.submit(FormKind::Contact, &contact_form()).await;
        assert!(matches!(result, Err(CheckoutError::FormRejected(_))));
    }

    fn refund_form() -> LeadForm {
        LeadForm {
            email: "jane@school.edu".to_string(),
            message: "Accidental duplicate purchase".to_string(),
            terms: true,
            ..LeadForm::default()
        }
    }

    #[test]
    fn test_signup_password_rules() {
        let mut form = LeadForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@school.edu".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..LeadForm::default()
        };
        let errors = form.validate(FormKind::Signup);
        assert!(errors.iter().any(|e| e.field == "password"));

        form.password = "longenough8".to_string();
        form.confirm_password = "different8".to_string();
        let errors = form.validate(FormKind::Signup);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Passwords do not match");
    }

    #[test]
    fn test_countdowns() {
        assert_eq!(FormKind::Contact.countdown(), Duration::from_secs(3));
        assert_eq!(FormKind::Signup.countdown(), Duration::from_secs(5));
    }
}
