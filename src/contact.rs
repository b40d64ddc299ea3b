//! Contact form validation and relay to a transactional email service.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum ContactError {
    #[error("contact form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("message relay failed: {0}")]
    MessageRelayFailed(String),
}

impl From<reqwest::Error> for ContactError {
    fn from(err: reqwest::Error) -> Self {
        ContactError::MessageRelayFailed(err.to_string())
    }
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: Field, message: &'static str| {
            if !ok {
                errors.push(FieldError { field, message });
            }
        };

        check(
            self.name.trim().chars().count() >= 2,
            Field::Name,
            "Name must be at least 2 characters",
        );
        check(
            EMAIL_PATTERN.is_match(self.email.trim()),
            Field::Email,
            "Please enter a valid email address",
        );
        check(
            self.subject.trim().chars().count() >= 5,
            Field::Subject,
            "Subject must be at least 5 characters",
        );
        check(
            self.message.trim().chars().count() >= 10,
            Field::Message,
            "Message must be at least 10 characters",
        );

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Outbound delivery of a validated contact message.
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, form: &ContactForm) -> Result<(), ContactError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    subject: &'a str,
    message: &'a str,
    to_email: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

pub struct EmailJsRelay {
    client: reqwest::Client,
    endpoint: String,
    settings: EmailJsSettings,
}

impl EmailJsRelay {
    pub fn new(settings: EmailJsSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: EMAILJS_SEND_URL.to_string(),
            settings,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send(&self, form: &ContactForm) -> Result<(), ContactError> {
        let request = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: TemplateParams {
                from_name: &form.name,
                from_email: &form.email,
                subject: &form.subject,
                message: &form.message,
                to_email: &self.settings.to_email,
            },
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ContactError::MessageRelayFailed(format!(
            "email service error {status}: {body}"
        )))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

/// Form state for one visitor: the fields, per-field errors and send status.
#[derive(Clone, Debug, Default)]
pub struct ContactSession {
    pub form: ContactForm,
    pub field_errors: Vec<FieldError>,
    pub status: SubmitStatus,
}

impl ContactSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Validates and relays the form. Success clears the fields; a relay
    /// failure keeps them so the visitor can retry.
    pub async fn submit(&mut self, relay: &dyn EmailRelay) -> Result<(), ContactError> {
        if let Err(errors) = self.form.validate() {
            self.field_errors = errors.clone();
            self.status = SubmitStatus::Idle;
            return Err(ContactError::Invalid(errors));
        }
        self.field_errors.clear();
        self.status = SubmitStatus::Sending;

        match relay.send(&self.form).await {
            Ok(()) => {
                tracing::info!("contact message relayed");
                self.form = ContactForm::default();
                self.status = SubmitStatus::Sent;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "email send error");
                self.status = SubmitStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn dismiss_status(&mut self) {
        self.status = SubmitStatus::Idle;
    }
}
