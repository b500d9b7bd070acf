//! Structural validation of untrusted data against a declared schema
//!
//! A schema is a Rust type: serde describes its shape and `validator`
//! describes its constraints. Validation runs in two steps:
//!
//! 1. **Structure**: deserialize the JSON value, tracking the path of the
//!    first structural failure (missing field, wrong type, unknown enum value).
//! 2. **Constraints**: run the derived `Validate` rules and report every
//!    violation, including those inside nested structs and lists.
//!
//! Either step yields a [`ValidationFailure`] whose `issues` carry one entry
//! per offending field, never a single flattened string.

use crate::error::{ValidationFailure, ValidationIssue};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// A data contract untrusted input can be checked against.
///
/// Implemented for every type that can be deserialized, re-serialized (so the
/// sanitizer can inspect the validated value) and validated.
pub trait Schema: DeserializeOwned + Serialize + Validate {}

impl<T> Schema for T where T: DeserializeOwned + Serialize + Validate {}

/// Validate `data` against the schema `T`.
///
/// # Errors
///
/// Returns [`ValidationFailure`] with the structured issue list and the data
/// as received.
pub fn validate<T: Schema>(data: &Value) -> Result<T, ValidationFailure> {
    let value: T = serde_path_to_error::deserialize(data).map_err(|err| {
        let issue = structural_issue(&err);
        debug!(path = %issue.path, code = %issue.code, "Input rejected by schema structure");
        ValidationFailure::new(vec![issue], data.clone())
    })?;

    check_constraints(&value, data)?;
    Ok(value)
}

/// Run the constraint rules of `T` on an already deserialized value.
///
/// Issue paths use the serialized field names, so a field is reported under
/// the same path whether it is missing or out of range.
///
/// # Errors
///
/// Returns [`ValidationFailure`] carrying every violation and `received`.
pub fn check_constraints<T: Schema>(value: &T, received: &Value) -> Result<(), ValidationFailure> {
    let Err(errors) = value.validate() else {
        return Ok(());
    };

    let shape = serde_json::to_value(value).unwrap_or_else(|_| received.clone());
    let mut issues = Vec::new();
    collect_issues(&errors, "", Some(&shape), &mut issues);
    issues.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.code.cmp(&b.code)));
    debug!(issues = issues.len(), "Input rejected by schema constraints");
    Err(ValidationFailure::new(issues, received.clone()))
}

fn structural_issue(err: &serde_path_to_error::Error<serde_json::Error>) -> ValidationIssue {
    let rendered = err.path().to_string();
    let path = if rendered == "." { String::new() } else { rendered };
    let message = err.inner().to_string();

    if let Some(field) = missing_field(&message) {
        return ValidationIssue::new(join_path(&path, field), "required", message);
    }

    let code = if message.starts_with("unknown variant") {
        "invalid_enum"
    } else if message.starts_with("invalid length") {
        "invalid_length"
    } else {
        "invalid_type"
    };
    ValidationIssue::new(path, code, message)
}

/// Field name from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn collect_issues(errors: &ValidationErrors, prefix: &str, shape: Option<&Value>, out: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let key = wire_name(shape, &field.to_string());
        let path = join_path(prefix, &key);
        let child = shape.and_then(|value| value.get(key.as_str()));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| constraint_issue(&path, e)));
            }
            ValidationErrorsKind::Struct(inner) => collect_issues(inner, &path, child, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let element = child.and_then(|value| value.get(*index));
                    collect_issues(inner, &format!("{path}[{index}]"), element, out);
                }
            }
        }
    }
}

/// Serialized name of the Rust field `field` at this level of `shape`.
///
/// validator reports Rust identifiers while serde may rename them
/// (`max_memory` vs `maxMemory`); keys are matched ignoring case and
/// separators. Unknown keys are reported as-is.
fn wire_name(shape: Option<&Value>, field: &str) -> String {
    let Some(Value::Object(map)) = shape else {
        return field.to_string();
    };
    if map.contains_key(field) {
        return field.to_string();
    }

    let wanted = fold_name(field);
    map.keys()
        .find(|key| fold_name(key) == wanted)
        .cloned()
        .unwrap_or_else(|| field.to_string())
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn constraint_issue(path: &str, error: &ValidationError) -> ValidationIssue {
    let message = error
        .message
        .as_ref()
        .map_or_else(|| format!("failed `{}` constraint", error.code), ToString::to_string);
    ValidationIssue::new(path, error.code.to_string(), message)
}
