use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Form control name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least {min} characters long")]
    MessageTooShort { min: usize },
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot in the
/// domain with something on both sides of it.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3
        && chars[1..chars.len() - 1]
            .iter()
            .any(|&c| c == '.')
}

/// Checks one field's trimmed value.
pub fn validate_field(field: Field, raw: &str, min_message_len: usize) -> Result<(), FieldError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(FieldError::Required(field));
    }

    match field {
        Field::Email if !is_email_shaped(value) => Err(FieldError::InvalidEmail),
        // Length in UTF-16 code units, as browsers measure text fields.
        Field::Message if value.encode_utf16().count() < min_message_len => {
            Err(FieldError::MessageTooShort {
                min: min_message_len,
            })
        }
        _ => Ok(()),
    }
}
