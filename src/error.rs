use std::fmt;

/// Rejected quiz input. A load either fully succeeds or yields one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Io(String),
    Parse(String),
    MissingColumn(String),
    MissingField { question: usize, field: &'static str },
    InsufficientOptions { row: usize, found: usize },
    UnresolvedAnswer { row: usize, answer: String },
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "{}", msg),
            LoadError::Parse(msg) => write!(f, "{}", msg),
            LoadError::MissingColumn(col) => {
                write!(f, "CSV is missing required column '{}'", col)
            }
            LoadError::MissingField { question, field } => {
                write!(f, "Question {} is missing '{}'", question, field)
            }
            LoadError::InsufficientOptions { row, found } => write!(
                f,
                "Question {} has {} non-empty option(s), at least 2 are required",
                row, found
            ),
            LoadError::UnresolvedAnswer { row, answer } => write!(
                f,
                "Question {}: answer '{}' matches no option",
                row, answer
            ),
            LoadError::Empty => write!(f, "Quiz file contains no questions"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Recording or export could not run in this environment.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    EncoderUnavailable(String),
    Output(String),
    Encoder(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::EncoderUnavailable(msg) => write!(
                f,
                "Video encoding is not available: {}. Install ffmpeg or use a .cast file instead.",
                msg
            ),
            CaptureError::Output(msg) => write!(f, "Cannot write recording: {}", msg),
            CaptureError::Encoder(msg) => write!(f, "Encoder failed: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}
