//! Validation Utilities

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
///
/// Nested structs and lists are flattened into dotted paths such as
/// `items[0].quantity`.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect_field_errors(&errors, "", &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_field_errors(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Run `validator` rules on a request body.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Validate)]
    struct Line {
        #[validate(range(min = 1, message = "must be positive"))]
        quantity: i32,
    }

    #[derive(Validate)]
    struct Basket {
        #[validate(range(min = 1))]
        table: i64,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    fn field_errors(err: AppError) -> (String, Vec<FieldError>) {
        match err {
            AppError::Validation { message, errors } => (message, errors),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_request_reports_field_and_message() {
        let err = validate_request(&Line { quantity: 0 }).unwrap_err();
        let (message, errors) = field_errors(err);

        assert_eq!(message, "quantity: must be positive");
        assert_eq!(
            errors,
            vec![FieldError {
                field: "quantity".into(),
                message: "must be positive".into(),
            }]
        );
    }

    #[test]
    fn test_validate_request_passes_valid_body() {
        assert!(validate_request(&Line { quantity: 3 }).is_ok());
    }

    #[test]
    fn test_nested_list_errors_carry_their_path() {
        let basket = Basket {
            table: 4,
            lines: vec![Line { quantity: 2 }, Line { quantity: 0 }],
        };

        let (message, errors) = field_errors(validate_request(&basket).unwrap_err());

        assert_eq!(message, "lines[1].quantity: must be positive");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "lines[1].quantity");
    }

    #[test]
    fn test_every_failing_field_is_listed() {
        let basket = Basket {
            table: 0,
            lines: vec![Line { quantity: 0 }],
        };

        let (_, errors) = field_errors(validate_request(&basket).unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["lines[0].quantity", "table"]);
        // no custom message falls back to the rule code
        assert_eq!(errors[1].message, "range");
    }
}
