use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedalError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML parsing error in {part}: {message}")]
    XmlError { part: String, message: String },

    #[error("Spreadsheet error: {message}")]
    SpreadsheetError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Template,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MedalError {
    pub fn xml(part: impl Into<String>, err: impl std::fmt::Display) -> Self {
        MedalError::XmlError {
            part: part.into(),
            message: err.to_string(),
        }
    }

    pub fn spreadsheet(message: impl Into<String>) -> Self {
        MedalError::SpreadsheetError {
            message: message.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        MedalError::TemplateError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        MedalError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MedalError::IoError(_) | MedalError::TaskError(_) => ErrorCategory::Io,
            MedalError::CsvError(_) | MedalError::SpreadsheetError { .. } => ErrorCategory::Input,
            MedalError::ZipError(_)
            | MedalError::XmlError { .. }
            | MedalError::TemplateError { .. } => ErrorCategory::Template,
            MedalError::ConfigError { .. }
            | MedalError::ConfigValidationError { .. }
            | MedalError::MissingConfigError { .. }
            | MedalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MedalError::SerializationError(_) | MedalError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::Template => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MedalError::IoError(_) => {
                "Check that the input files exist and the output directory is writable"
            }
            MedalError::TaskError(_) => "Retry the run; if it keeps failing, lower --concurrency",
            MedalError::CsvError(_) => "Make sure the CSV file is UTF-8 and names are in the first column",
            MedalError::SpreadsheetError { .. } => {
                "Use an .xlsx or .csv file with one full name per row in the first column"
            }
            MedalError::ZipError(_) | MedalError::XmlError { .. } => {
                "Re-save the template as .docx (Word 2007+) and try again"
            }
            MedalError::TemplateError { .. } => {
                "Check that the template contains the placeholder text exactly as configured"
            }
            MedalError::ConfigError { .. }
            | MedalError::ConfigValidationError { .. }
            | MedalError::MissingConfigError { .. }
            | MedalError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML job file"
            }
            MedalError::SerializationError(_) => "Check free disk space and file permissions",
            MedalError::ProcessingError { .. } => "Check the list of names and the template",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MedalError::IoError(e) => format!("File access failed: {}", e),
            MedalError::SpreadsheetError { message } => format!("Could not read names: {}", message),
            MedalError::TemplateError { message } => format!("Template problem: {}", message),
            MedalError::XmlError { part, .. } => {
                format!("The template part '{}' is not valid XML", part)
            }
            MedalError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            MedalError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MedalError>;
