use tokio::time::Instant;

use crate::{
    config::ContactFormConfig,
    contact::{
        submit::Submitter,
        validation::{validate_field, Field, FieldError},
    },
};

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_TEXT: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_TEXT: &str = "Sorry, there was an error sending your message. Please try again.";

/// Per-field state mirrored by the label styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub value: String,
    pub focused: bool,
    pub has_value: bool,
    pub error: Option<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            label: SUBMIT_LABEL,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: &'static str,
    pub expires_at: Instant,
}

/// Trimmed payload handed to a [`Submitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Sent,
    Failed,
}

pub struct ContactForm {
    config: ContactFormConfig,
    fields: [FieldState; 4],
    button: SubmitButton,
    banner: Option<Banner>,
}

impl ContactForm {
    pub fn new(config: ContactFormConfig) -> Self {
        Self {
            config,
            fields: Default::default(),
            button: SubmitButton::default(),
            banner: None,
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[field.index()]
    }

    pub fn is_sending(&self) -> bool {
        self.button.disabled
    }

    pub fn focus(&mut self, field: Field) {
        self.fields[field.index()].focused = true;
    }

    /// Leaving a field validates it. The label stays raised while the field
    /// holds text. Returns whether the field is valid.
    pub fn blur(&mut self, field: Field) -> bool {
        let state = &mut self.fields[field.index()];
        state.has_value = !state.value.trim().is_empty();
        if !state.has_value {
            state.focused = false;
        }
        self.validate(field)
    }

    /// Typing clears any error on the field.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        let state = &mut self.fields[field.index()];
        state.value = value.into();
        state.has_value = !state.value.trim().is_empty();
        state.error = None;
    }

    pub fn validate(&mut self, field: Field) -> bool {
        let state = &mut self.fields[field.index()];
        state.error = validate_field(field, &state.value, self.config.min_message_len).err();
        state.error.is_none()
    }

    /// Validates every field so all errors show at once.
    pub fn validate_all(&mut self) -> bool {
        Field::ALL
            .into_iter()
            .fold(true, |valid, field| self.validate(field) && valid)
    }

    pub fn message(&self) -> ContactMessage {
        let value = |field: Field| self.field(field).value.trim().to_string();
        ContactMessage {
            name: value(Field::Name),
            email: value(Field::Email),
            subject: value(Field::Subject),
            message: value(Field::Message),
        }
    }

    /// Validates and enters the loading state. `None` if any field is invalid
    /// or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.is_sending() || !self.validate_all() {
            return None;
        }

        self.button = SubmitButton {
            label: SENDING_LABEL,
            disabled: true,
        };
        Some(self.message())
    }

    pub fn finish_submit(&mut self, result: anyhow::Result<()>) -> SubmitOutcome {
        self.button = SubmitButton::default();

        match result {
            Ok(()) => {
                self.show_banner(BannerKind::Success, SUCCESS_TEXT);
                self.reset();
                SubmitOutcome::Sent
            }
            Err(err) => {
                log::error!("Contact form submission failed: {err:#}");
                self.show_banner(BannerKind::Error, FAILURE_TEXT);
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit<S: Submitter>(&mut self, submitter: &S) -> SubmitOutcome {
        let Some(message) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };

        let result = submitter.send(&message).await;
        self.finish_submit(result)
    }

    /// The banner, if one is showing at `now`.
    pub fn banner(&self, now: Instant) -> Option<&Banner> {
        self.banner.as_ref().filter(|banner| now < banner.expires_at)
    }

    pub fn reset(&mut self) {
        self.fields = Default::default();
    }

    fn show_banner(&mut self, kind: BannerKind, text: &'static str) {
        self.banner = Some(Banner {
            kind,
            text,
            expires_at: Instant::now() + self.config.banner_lifetime,
        });
    }
}

#[cfg(test)]
impl ContactForm {
    pub fn button(&self) -> &SubmitButton {
        &self.button
    }
}
