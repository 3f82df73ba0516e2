use gloo_net::http::Request;
use serde::Deserialize;
use web_sys::{FormData, HtmlFormElement};

use crate::error::{js_message, SubmitError};

/// Delivers the form somewhere. Resolves `Ok` only for an accepted
/// submission.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self) -> Result<(), SubmitError>;
}

/// Multipart POST of the live form to its `action` URL (a hosted form
/// service such as Formspree).
pub struct FormPost {
    form: HtmlFormElement,
}

impl FormPost {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl Transport for FormPost {
    async fn send(&self) -> Result<(), SubmitError> {
        let body = FormData::new_with_form(&self.form)
            .map_err(|e| SubmitError::Encode(js_message(&e)))?;
        let endpoint = self.form.action();

        let response = Request::post(&endpoint)
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if is_success(status) {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SubmitError::Rejected {
            status,
            detail: rejection_detail(&body),
        })
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Deserialize)]
struct FieldError {
    message: String,
    #[serde(default)]
    field: Option<String>,
}

/// Human-readable reason from a JSON error body, if there is one.
pub fn rejection_detail(body: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
    if !parsed.errors.is_empty() {
        let joined = parsed
            .errors
            .iter()
            .map(|e| match &e.field {
                Some(field) => format!("{}: {}", field, e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Some(joined);
    }
    parsed.error.filter(|e| !e.is_empty())
}
