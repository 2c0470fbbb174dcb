use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error at {path}: {source}")]
    StorageError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Could not parse loadout '{path}': {message}")]
    LoadoutParseError { path: String, message: String },

    #[error("Module catalog error: {message}")]
    CatalogError { message: String },

    #[error("No mapping for slot '{slot}': {message}")]
    MappingError { slot: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Mapping,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ExportError::LoadoutParseError { .. }
            | ExportError::CatalogError { .. }
            | ExportError::SerializationError(_) => ErrorCategory::Input,
            ExportError::MappingError { .. } => ErrorCategory::Mapping,
            ExportError::IoError(_) | ExportError::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            // a table gap means every export of this ship will fail until fixed
            ErrorCategory::Mapping => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExportError::MissingConfigError { field } => {
                format!("Set '{}' on the command line or in the config file", field)
            }
            ExportError::InvalidConfigValueError { field, .. }
            | ExportError::ConfigValidationError { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            ExportError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            ExportError::LoadoutParseError { .. } => {
                "Make sure the loadout file is a companion snapshot with a 'ship' object".to_string()
            }
            ExportError::CatalogError { .. } => {
                "Make sure the module catalog is a JSON object or array of descriptors".to_string()
            }
            ExportError::MappingError { .. } => {
                "Add the missing entry to the translation tables".to_string()
            }
            ExportError::StorageError { .. } | ExportError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            ExportError::SerializationError(_) => "Check the input JSON is well formed".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Mapping => format!("Loadout could not be translated: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_errors_are_critical() {
        let err = ExportError::MappingError {
            slot: "Armour".to_string(),
            message: "no standard key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Mapping);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("Armour"));
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let err = ExportError::StorageError {
            path: "/nowhere".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/nowhere"));
    }
}
