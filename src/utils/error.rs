use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Unknown sound: /{sound}/")]
    UnknownSound { sound: String },

    #[error("Unknown phonological process: {name}")]
    UnknownProcess { name: String },

    #[error("Position '{position}' is not assessed for /{sound}/")]
    PositionNotAllowed { sound: String, position: String },

    #[error("Invalid position '{value}' (expected initial, medial or final)")]
    InvalidPosition { value: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    Configuration,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ScoringError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoringError::UnknownSound { .. } | ScoringError::UnknownProcess { .. } => {
                ErrorCategory::Lookup
            }
            ScoringError::PositionNotAllowed { .. }
            | ScoringError::InvalidPosition { .. }
            | ScoringError::CsvError(_)
            | ScoringError::ValidationError { .. } => ErrorCategory::Input,
            ScoringError::MissingConfigError { .. }
            | ScoringError::InvalidConfigValueError { .. }
            | ScoringError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ScoringError::IoError(_) | ScoringError::ZipError(_) => ErrorCategory::Io,
            ScoringError::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A table lookup miss means the caller broke the item invariant.
            ErrorCategory::Lookup => ErrorSeverity::Critical,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScoringError::UnknownSound { .. } => {
                "Only sounds from the assessment sheet can be scored; regenerate the sheet with template_sheet".to_string()
            }
            ScoringError::UnknownProcess { .. } => {
                "Use one of the process names from the reference table".to_string()
            }
            ScoringError::PositionNotAllowed { sound, .. } => {
                format!("Remove the row for /{}/ or change it to an assessed position", sound)
            }
            ScoringError::InvalidPosition { .. } => {
                "Positions must be one of: initial, medial, final".to_string()
            }
            ScoringError::CsvError(_) => {
                "Check the sheet has the columns sound, position, produced".to_string()
            }
            ScoringError::IoError(_) => {
                "Check the input file exists and the output directory is writable".to_string()
            }
            ScoringError::ZipError(_) => {
                "Retry without --bundle or check free disk space".to_string()
            }
            ScoringError::SerializationError(_) => "Please report this as a bug".to_string(),
            ScoringError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            ScoringError::InvalidConfigValueError { field, .. }
            | ScoringError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            ScoringError::ValidationError { .. } => {
                "Correct the assessment input and run again".to_string()
            }
        }
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Lookup => format!("Scoring tables do not cover this input: {}", self),
            ErrorCategory::Input => format!("The assessment input is not valid: {}", self),
            ErrorCategory::Configuration => format!("The configuration is not valid: {}", self),
            ErrorCategory::Io => format!("Could not read or write files: {}", self),
            ErrorCategory::Serialization => format!("Could not produce the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
