use core::fmt;

/// Errors that can occur while turning JSON input into a [`JsonValue`](crate::JsonValue).
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The backend library could not tokenize or parse the input as JSON.
    MalformedInput {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The backend library produced a node that does not fit its own contract.
    InternalConsistency { message: String },
    /// The document nests containers deeper than the configured limit.
    DepthLimitExceeded { limit: usize },
    /// Reading the input stream failed.
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn malformed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
        Error::MalformedInput {
            source: source.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Error {
        Error::InternalConsistency {
            message: message.into(),
        }
    }

    pub(crate) fn depth_limit_exceeded(limit: usize) -> Error {
        Error::DepthLimitExceeded { limit }
    }

    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::MalformedInput { .. })
    }

    #[must_use]
    pub fn is_internal_consistency(&self) -> bool {
        matches!(self, Error::InternalConsistency { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput { source } => write!(f, "Malformed JSON input: {source}"),
            Error::InternalConsistency { message } => {
                write!(f, "Unexpected JSON node: {message}")
            }
            Error::DepthLimitExceeded { limit } => {
                write!(f, "JSON document is nested deeper than {limit} levels")
            }
            Error::Io(error) => write!(f, "Failed to read JSON input: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedInput { source } => Some(&**source),
            Error::Io(error) => Some(error),
            Error::InternalConsistency { .. } | Error::DepthLimitExceeded { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}
