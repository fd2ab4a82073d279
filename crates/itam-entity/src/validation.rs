//! Client-side form validation.

use itam_core::error::{AppError, ErrorKind};
use itam_core::result::AppResult;
use validator::{Validate, ValidationErrors};

/// Flatten validator errors into `field: message` pairs, sorted by field
/// so the output is stable.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Validate a form before it is sent. Failures never reach the network.
pub fn validate_form<T: Validate>(form: &T) -> AppResult<()> {
    form.validate().map_err(|errors| {
        let summary = field_messages(&errors)
            .into_iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::with_source(ErrorKind::Validation, summary, errors)
    })
}
