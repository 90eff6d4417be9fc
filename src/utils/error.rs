use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Setup target is incomplete: '{missing}' was not supplied")]
    PartialTarget { missing: &'static str },

    #[error("Message sink is closed")]
    SinkClosed,

    #[error("Malformed emulator payload '{payload}': {reason}")]
    DecodeError { payload: String, reason: String },

    #[error("Command handler failed: {message}")]
    HandlerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Protocol,
    Execution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BridgeError {
    pub fn decode(payload: &str, reason: impl Into<String>) -> Self {
        Self::DecodeError {
            payload: payload.to_string(),
            reason: reason.into(),
        }
    }

    pub fn handler(message: impl Into<String>) -> Self {
        Self::HandlerError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SinkClosed => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) | Self::PartialTarget { .. } | Self::DecodeError { .. } => {
                ErrorCategory::Protocol
            }
            Self::HandlerError { .. } => ErrorCategory::Execution,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DecodeError { .. } => ErrorSeverity::Low,
            Self::SinkClosed | Self::HandlerError { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::PartialTarget { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the output path is writable and the disk is not full",
            Self::SerializationError(_) => "Report the command that could not be serialized",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file syntax and field names"
            }
            Self::InvalidConfigValueError { .. } => "Fix the reported configuration value",
            Self::PartialTarget { .. } => "Pass both --arch and --mode, or neither",
            Self::SinkClosed => "Make sure the receiving process is still running",
            Self::DecodeError { .. } => "Check that the sender uses the emulator::: wire format",
            Self::HandlerError { .. } => "Inspect the emulator log and re-run setup",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not write emulator command: {}", e),
            Self::PartialTarget { missing } => {
                format!("Setup needs both an architecture and a mode ({} is missing)", missing)
            }
            Self::SinkClosed => "The emulator channel is no longer accepting commands".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
