//! Registration and link-resend forms.

use super::{ApiStatus, SiteError, SiteResult, escape_html, post_error_message};

/// The register page form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub course_key: String,
}

impl RegistrationForm {
    pub fn new(email: impl Into<String>, course_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            course_key: course_key.into(),
        }
    }

    /// Both fields are required; the email is checked first.
    pub fn validate(&self) -> SiteResult<()> {
        if self.email.is_empty() {
            return Err(SiteError::MissingField("an email address"));
        }
        if self.course_key.is_empty() {
            return Err(SiteError::MissingField("a course key"));
        }
        Ok(())
    }

    /// Form fields for `/api/register`.
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [("email", &self.email), ("course_key", &self.course_key)]
    }

    /// Message shown while the request is in flight.
    pub fn pending_message(&self) -> String {
        format!(
            "Asking to register <b>{}</b> for course key <b>{}</b>...<br/>",
            escape_html(&self.email),
            escape_html(&self.course_key)
        )
    }
}

/// The resend-link page form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResendForm {
    pub email: String,
}

impl ResendForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }

    pub fn validate(&self) -> SiteResult<()> {
        if self.email.is_empty() {
            return Err(SiteError::MissingField("an email address"));
        }
        Ok(())
    }

    /// Form fields for `/api/resend-link`.
    pub fn fields(&self) -> [(&'static str, &str); 1] {
        [("email", &self.email)]
    }

    pub fn pending_message(&self) -> String {
        format!(
            "Asking to resend registration link for <b>{}</b>...<br/>",
            escape_html(&self.email)
        )
    }

    /// Message for a completed request: the server's message on success,
    /// the raw response body otherwise.
    pub fn response_message(status: u16, body: &str) -> String {
        if status == 200 {
            if let Ok(api) = ApiStatus::from_json(body) {
                let message = api.message.unwrap_or_default();
                return format!("Response: {}", escape_html(&message));
            }
        }
        post_error_message(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_requires_email_first() {
        let form = RegistrationForm::new("", "");
        assert_eq!(form.validate().unwrap_err().to_string(), "Please provide an email address");
    }

    #[test]
    fn test_registration_requires_course_key() {
        let form = RegistrationForm::new("me@example.com", "");
        assert_eq!(form.validate().unwrap_err().to_string(), "Please provide a course key");
    }

    #[test]
    fn test_registration_ok() {
        let form = RegistrationForm::new("me@example.com", "bio101");
        assert!(form.validate().is_ok());
        assert_eq!(form.fields(), [("email", "me@example.com"), ("course_key", "bio101")]);
        assert_eq!(
            form.pending_message(),
            "Asking to register <b>me@example.com</b> for course key <b>bio101</b>...<br/>"
        );
    }

    #[test]
    fn test_pending_message_escapes_input() {
        let form = RegistrationForm::new("<script>", "k");
        assert!(form.pending_message().contains("&lt;script&gt;"));
    }

    #[test]
    fn test_resend() {
        assert!(ResendForm::new("").validate().is_err());
        let form = ResendForm::new("me@example.com");
        assert!(form.validate().is_ok());
        assert_eq!(
            form.pending_message(),
            "Asking to resend registration link for <b>me@example.com</b>...<br/>"
        );
    }

    #[test]
    fn test_resend_response_messages() {
        assert_eq!(
            ResendForm::response_message(200, r#"{"error":false,"message":"sent"}"#),
            "Response: sent"
        );
        assert_eq!(
            ResendForm::response_message(500, "Internal Server Error"),
            "POST error: Internal Server Error"
        );
    }
}
