use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    /// The input's `name` attribute.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Your Name",
            FormField::Email => "Your Email",
            FormField::Message => "Your Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "John Doe",
            FormField::Email => "john@example.com",
            FormField::Message => "Tell me about your project...",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(FormField),

    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),

    #[error("the page is still loading")]
    NotReady,
}

/// What the visitor typed into the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Every field is required and the email must look like one, the same
    /// checks a browser applies to `required` and `type="email"` inputs.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in FormField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(FormError::Missing(field));
            }
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_what_a_browser_accepts() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(is_valid_email("user@localhost"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in ["", "jane", "@x.com", "jane@", "jane@x..com", "jane@-x.com", "ja ne@x.com", "a@b@c"] {
            assert!(!is_valid_email(address), "{address:?} accepted");
        }
    }

    #[test]
    fn required_fields_are_checked_in_order() {
        let fields = ContactFields::new("", "", "");
        assert_eq!(fields.validate(), Err(FormError::Missing(FormField::Name)));
        let fields = ContactFields::new("Jane", "jane@x.com", "   ");
        assert_eq!(fields.validate(), Err(FormError::Missing(FormField::Message)));
        let fields = ContactFields::new("Jane", "jane-at-x", "Hi");
        assert_eq!(fields.validate(), Err(FormError::InvalidEmail("jane-at-x".to_string())));
        assert_eq!(ContactFields::new("Jane", "jane@x.com", "Hi").validate(), Ok(()));
    }
}
