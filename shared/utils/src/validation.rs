use crate::error::{ShelfwatchError, ShelfwatchResult};
use std::path::Path;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

pub fn validate_model<T: Validate>(model: &T) -> ShelfwatchResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(ShelfwatchError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = match (&error.message, error.code.as_ref()) {
                        (Some(message), _) => format!("{}: {}", path, message),
                        (None, "length") => format!("Length validation failed for field '{}'", path),
                        (None, "range") => format!("Value out of range for field '{}'", path),
                        (None, code) => format!("Validation failed for field '{}': {}", path, code),
                    };
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, messages),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{}[{}]", path, index), nested, messages);
                }
            }
        }
    }
}

/// Lowercased extension of `file_name`, if any.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn validate_file_type(file_name: &str, allowed_types: &[String]) -> ShelfwatchResult<()> {
    let extension = file_extension(file_name).unwrap_or_default();

    if !allowed_types.iter().any(|allowed| allowed.eq_ignore_ascii_case(&extension)) {
        return Err(ShelfwatchError::validation(
            "file_type",
            format!(
                "File type '{}' not allowed. Allowed types: {}",
                extension,
                allowed_types.join(", ")
            ),
        ));
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, max_size: u64) -> ShelfwatchResult<()> {
    if file_size == 0 {
        return Err(ShelfwatchError::validation("file_size", "Uploaded file is empty"));
    }

    if file_size > max_size {
        return Err(ShelfwatchError::validation(
            "file_size",
            format!(
                "File size {} bytes exceeds maximum allowed size {} bytes",
                file_size, max_size
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn allowed() -> Vec<String> {
        vec!["csv".to_string(), "xlsx".to_string(), "xls".to_string()]
    }

    #[test]
    fn test_file_type_validation() {
        assert!(validate_file_type("estoque.CSV", &allowed()).is_ok());
        assert!(validate_file_type("estoque.xlsx", &allowed()).is_ok());
        assert!(validate_file_type("estoque.pdf", &allowed()).is_err());
        assert!(validate_file_type("estoque", &allowed()).is_err());
    }

    #[test]
    fn test_file_size_validation() {
        assert!(validate_file_size(10, 100).is_ok());
        assert!(validate_file_size(0, 100).is_err());

        let error = validate_file_size(101, 100).unwrap_err();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_model(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_page_size_is_reported() {
        let mut config = AppConfig::default();
        config.analysis.page_size = 0;

        let error = validate_model(&config).unwrap_err();
        assert!(error.to_string().contains("page_size"));
    }
}
