use thiserror::Error;
use wasm_bindgen::JsValue;

/// Raised while wiring a component to the page markup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("element `{selector}` is not a {expected}")]
    WrongElement {
        selector: String,
        expected: &'static str,
    },
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for InitError {
    fn from(value: JsValue) -> Self {
        InitError::Js(js_message(&value))
    }
}

/// Client-side check that runs before anything is sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("endpoint rejected the submission with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("request could not be completed: {0}")]
    Network(String),
    #[error("could not encode the form body: {0}")]
    Encode(String),
}

impl SubmitError {
    /// Text shown to the visitor; transport problems get their own hint.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Network(_) => {
                "Network error. Please check your connection and try again."
            }
            SubmitError::Rejected { .. } | SubmitError::Encode(_) => {
                "Oops! Something went wrong. Please try again."
            }
        }
    }
}

/// Best-effort string form of a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_get_a_distinct_message() {
        let network = SubmitError::Network("offline".into());
        let rejected = SubmitError::Rejected { status: 422, detail: None };
        assert_ne!(network.user_message(), rejected.user_message());
        assert_eq!(
            SubmitError::Encode("bad".into()).user_message(),
            rejected.user_message()
        );
    }

    #[test]
    fn validation_errors_read_as_user_messages() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "Please fill in all required fields."
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }
}
