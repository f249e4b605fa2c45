pub mod form;
pub mod submit;
pub mod validation;

use anyhow::Context;
use tokio::time::Instant;

use crate::config::ContactFormConfig;

use form::ContactForm;
use submit::SimulatedSubmitter;
use validation::Field;

pub use form::{ContactMessage, SubmitOutcome};

/// Fills the form as a visitor would, submits it and prints the result.
pub fn run(input: ContactMessage, config: ContactFormConfig) -> anyhow::Result<SubmitOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;

    let submitter = SimulatedSubmitter::new(config.submit_delay);
    let mut form = ContactForm::new(config);

    for (field, value) in [
        (Field::Name, input.name),
        (Field::Email, input.email),
        (Field::Subject, input.subject),
        (Field::Message, input.message),
    ] {
        form.focus(field);
        form.input(field, value);
        form.blur(field);
    }

    let outcome = runtime.block_on(form.submit(&submitter));

    if outcome == SubmitOutcome::Invalid {
        for field in Field::ALL {
            if let Some(error) = &form.field(field).error {
                println!("{}: {error}", field.name());
            }
        }
    } else if let Some(banner) = form.banner(Instant::now()) {
        println!("{}", banner.text);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn instant_config() -> ContactFormConfig {
        ContactFormConfig {
            submit_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn message(email: &str) -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: email.to_string(),
            subject: "Hello".to_string(),
            message: "Lovely portfolio, let's talk.".to_string(),
        }
    }

    #[test]
    fn valid_input_is_sent() {
        let outcome = run(message("ada@example.com"), instant_config()).unwrap();
        assert_eq!(outcome, SubmitOutcome::Sent);
    }

    #[test]
    fn invalid_input_is_not_sent() {
        let outcome = run(message("ada@example"), instant_config()).unwrap();
        assert_eq!(outcome, SubmitOutcome::Invalid);
    }
}
