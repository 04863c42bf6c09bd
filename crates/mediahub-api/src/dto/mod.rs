//! Data Transfer Objects for the HTTP API.

pub mod request;
pub mod response;

use validator::{Validate, ValidationErrors};

use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;

/// Run the derive-based checks of a request DTO.
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|errors| AppError::validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
