//! Typed error handling for tablefinder
//!
//! Every operation that can reject input returns a [`FinderError`], so the
//! presentation layer can match on the category instead of parsing strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: rejected review submissions and bad form payloads
//! - [`LookupError`]: references to restaurants that do not exist
//! - [`StorageError`]: key-value slot failures
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.submit_review(3, "Pat", 9, "Great value") {
//!     Ok(restaurant) => println!("rating is now {}", restaurant.rating),
//!     Err(FinderError::Validation(e)) => eprintln!("rejected: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// The main error type for tablefinder
#[derive(Debug)]
pub enum FinderError {
    /// Input validation errors
    Validation(ValidationError),

    /// A referenced restaurant does not exist
    Lookup(LookupError),

    /// Key-value slot errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinderError::Validation(e) => write!(f, "{}", e),
            FinderError::Lookup(e) => write!(f, "{}", e),
            FinderError::Storage(e) => write!(f, "{}", e),
            FinderError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinderError::Validation(e) => Some(e),
            FinderError::Lookup(e) => Some(e),
            FinderError::Storage(e) => Some(e),
            FinderError::Config(e) => Some(e),
        }
    }
}

/// Serializable rejection handed back to the presentation layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FinderError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FinderError::Validation(_) => "VALIDATION_ERROR",
            FinderError::Lookup(e) => e.error_code(),
            FinderError::Storage(_) => "STORAGE_ERROR",
            FinderError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the error should be shown to the user
    ///
    /// Storage and configuration problems are recovered or reported by the
    /// host, never surfaced as a form rejection.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, FinderError::Validation(_) | FinderError::Lookup(_))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FinderError::Lookup(LookupError::RestaurantNotFound { id }) => {
                Some(serde_json::json!({ "restaurant_id": id }))
            }
            FinderError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Field validation errors, one per failing rule
    FieldErrors(Vec<FieldValidationError>),

    /// Submitted payload is not a JSON object of the expected shape
    InvalidPayload { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Names of the fields that were rejected
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            ValidationError::InvalidPayload { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidPayload { message } => {
                write!(f, "Invalid payload: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for FinderError {
    fn from(err: ValidationError) -> Self {
        FinderError::Validation(err)
    }
}

// =============================================================================
// Lookup Errors
// =============================================================================

/// A request referenced something the record store does not hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    RestaurantNotFound { id: u32 },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::RestaurantNotFound { id } => {
                write!(f, "Restaurant with id '{}' not found", id)
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl LookupError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LookupError::RestaurantNotFound { .. } => "RESTAURANT_NOT_FOUND",
        }
    }
}

impl From<LookupError> for FinderError {
    fn from(err: LookupError) -> Self {
        FinderError::Lookup(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the key-value slot
#[derive(Debug)]
pub enum StorageError {
    /// Reading a key failed or returned an unusable payload
    ReadError { key: String, message: String },

    /// Writing a key failed
    WriteError { key: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadError { key, message } => {
                write!(f, "Failed to read key '{}': {}", key, message)
            }
            StorageError::WriteError { key, message } => {
                write!(f, "Failed to write key '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for FinderError {
    fn from(err: StorageError) -> Self {
        FinderError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for FinderError {
    fn from(err: ConfigError) -> Self {
        FinderError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for FinderError {
    fn from(err: serde_yaml::Error) -> Self {
        FinderError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for FinderError {
    fn from(err: std::io::Error) -> Self {
        FinderError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for tablefinder operations
pub type FinderResult<T> = Result<T, FinderError>;
