//! Contact form and newsletter validation.

use crate::text::is_valid_email;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_MESSAGE_LEN: usize = 10;

fn default_topic() -> String {
    "General".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot. Real visitors never see this field.
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

/// A message that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Accepted(ContactMessage),
    /// The honeypot was filled in. Callers report this exactly like success.
    Discarded,
}

fn email_error(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        Some(FieldError { field: Field::Email, message: "Email is required." })
    } else if !is_valid_email(email) {
        Some(FieldError { field: Field::Email, message: "Please enter a valid email." })
    } else {
        None
    }
}

pub fn validate_contact(form: &ContactForm) -> Result<ContactOutcome, ValidationErrors> {
    if !form.website.trim().is_empty() {
        return Ok(ContactOutcome::Discarded);
    }
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(FieldError { field: Field::Name, message: "Name is required." });
    }
    errors.extend(email_error(&form.email));
    if form.message.trim().chars().count() < MIN_MESSAGE_LEN {
        errors.push(FieldError { field: Field::Message, message: "Message must be at least 10 characters." });
    }
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    let topic = form.topic.trim();
    Ok(ContactOutcome::Accepted(ContactMessage {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        topic: if topic.is_empty() { default_topic() } else { topic.to_string() },
        message: form.message.trim().to_string(),
    }))
}

pub fn validate_subscription(email: &str) -> Result<(), FieldError> {
    match email_error(email) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
