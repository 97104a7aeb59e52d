use folio_contact::ContactRequest;
use strum::{AsRefStr, Display, EnumString};

/// Form input a draft field is bound to.
#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Unsent form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl SubmissionDraft {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    /// Wire payload for this draft, with the subject derived from the name.
    pub fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.to_owned(),
            email: self.email.to_owned(),
            subject: ContactRequest::subject_for(&self.name),
            message: self.message.to_owned(),
        }
    }
}
