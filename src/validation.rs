//! Request payload validation.
//!
//! Every violation is collected and reported together; nothing here stops at
//! the first failing field.

use std::collections::BTreeSet;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::post::PostPayload;
use crate::tag::TagInput;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validate a post payload, including every tag attached to it.
pub fn validate_post(payload: &PostPayload) -> Result<(), Vec<String>> {
    payload.validate().map_err(|e| error_messages(&e))
}

/// Validate a replacement tag set.
pub fn validate_tags(tags: &[TagInput]) -> Result<(), Vec<String>> {
    let mut messages = BTreeSet::new();
    for tag in tags {
        if let Err(e) = tag.validate() {
            collect_messages(&e, &mut messages);
        }
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(messages.into_iter().collect())
    }
}

/// Flatten a (possibly nested) validation report into sorted, de-duplicated
/// human-readable messages.
#[must_use]
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = BTreeSet::new();
    collect_messages(errors, &mut messages);
    messages.into_iter().collect()
}

fn collect_messages(errors: &ValidationErrors, out: &mut BTreeSet<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error.message.as_ref().map_or_else(
                        || format!("{field} is invalid ({})", error.code),
                        ToString::to_string,
                    );
                    out.insert(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
