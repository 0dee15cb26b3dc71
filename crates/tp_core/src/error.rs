use std::fmt;

/// Errors surfaced at the API boundary.
///
/// Guard failures inside the pipeline are not errors: they are silent,
/// deterministic resets. Everything here is about malformed requests.
#[derive(Debug)]
pub enum PipelineError {
    UnsupportedSchema { expected: u8, found: u8 },
    EmptyScenario,
    ValidationError(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::UnsupportedSchema { expected, found } => {
                write!(f, "Unsupported schema version: expected {}, found {}", expected, found)
            }
            PipelineError::EmptyScenario => {
                write!(f, "Scenario contains no ticks")
            }
            PipelineError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            PipelineError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PipelineError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        // Syntax, data, and EOF errors all come from reading a request;
        // only IO failures happen while writing a response.
        match err.classify() {
            serde_json::error::Category::Io => {
                PipelineError::SerializationError(err.to_string())
            }
            _ => PipelineError::DeserializationError(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
