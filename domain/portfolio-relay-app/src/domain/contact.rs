/// A contact form submission as typed by the visitor. Nothing here is
/// validated; empty fields are carried through as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// The plain text email that is sent to the operator for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub subject: String,
    pub body: String,
}

impl ContactEmail {
    pub fn compose(submission: &ContactSubmission) -> Self {
        Self {
            subject: format!("New Contact Form Message from {}", submission.name),
            body: format!(
                "Name: {}\nEmail: {}\nMessage: {}",
                submission.name, submission.email, submission.message
            ),
        }
    }
}
