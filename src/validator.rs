use anyhow::anyhow;
use axum::{
    Form,
    extract::{FromRequest, Request, rejection::FormRejection},
    http::StatusCode,
};
use farmmarket_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();

    // field_errors() is a HashMap; keep output stable.
    messages.sort();
    messages.join(", ")
}

pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(|errors| {
        AppError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            anyhow!("{}", format_errors(&errors)),
        )
    })
}

/// Deserializes an `application/x-www-form-urlencoded` body, mapping
/// rejections to 400 responses.
pub async fn extract_form<T, S>(req: Request, state: &S) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let Form(value) = Form::<T>::from_request(req, state)
        .await
        .map_err(|rejection| {
            if matches!(rejection, FormRejection::InvalidFormContentType(_)) {
                return AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/x-www-form-urlencoded' header"
                ));
            }

            let error_msg = rejection.body_text();
            if error_msg.contains("missing field") {
                let field = error_msg
                    .split("missing field `")
                    .nth(1)
                    .and_then(|s| s.split('`').next())
                    .unwrap_or("unknown");
                return AppError::bad_request(anyhow!("{} is required", field));
            }

            AppError::bad_request(anyhow!("Invalid form body"))
        })?;

    Ok(value)
}
