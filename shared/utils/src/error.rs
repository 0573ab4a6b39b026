use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShelfwatchError {
    #[error("Required column not found: {column}")]
    MissingColumn { column: String },

    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("Failed to load input: {message}")]
    Load { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ShelfwatchError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::Load { .. } => "LOAD_ERROR",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingColumn { .. } => 422,
            Self::UnsupportedFormat { .. } => 415,
            Self::Load { .. } => 400,
            Self::Export { .. } => 500,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type ShelfwatchResult<T> = Result<T, ShelfwatchError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
}

impl From<ShelfwatchError> for ErrorResponse {
    fn from(error: ShelfwatchError) -> Self {
        let message = match &error {
            ShelfwatchError::MissingColumn { column } => {
                format!("The file has no column usable as {}", column)
            }
            other => other.to_string(),
        };
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message,
        }
    }
}

impl From<std::io::Error> for ShelfwatchError {
    fn from(error: std::io::Error) -> Self {
        Self::load(error.to_string())
    }
}

impl From<csv::Error> for ShelfwatchError {
    fn from(error: csv::Error) -> Self {
        Self::load(format!("Invalid delimited text: {}", error))
    }
}

impl From<calamine::Error> for ShelfwatchError {
    fn from(error: calamine::Error) -> Self {
        Self::load(format!("Invalid workbook: {}", error))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ShelfwatchError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::export(error.to_string())
    }
}

impl From<config::ConfigError> for ShelfwatchError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_response() {
        let response = ErrorResponse::from(ShelfwatchError::missing_column("expiration_date"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "MISSING_COLUMN");
        assert_eq!(json["error"], "Required column not found: expiration_date");
        assert_eq!(json["message"], "The file has no column usable as expiration_date");
    }

    #[test]
    fn test_io_errors_are_load_errors() {
        let error: ShelfwatchError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "estoque.csv").into();
        assert_eq!(error.error_code(), "LOAD_ERROR");
        assert_eq!(error.http_status_code(), 400);
    }
}
