use core::fmt;

/// Result alias for `lineament`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by loading, clustering and reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Dimension mismatch between points, weights, boxes or metric.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Point data that cannot be clustered (non-finite coordinate, etc.).
    InvalidInput {
        /// Index of the offending point.
        index: usize,
        /// Error message.
        message: String,
    },

    /// Malformed line in a delimited input file.
    Parse {
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// I/O failure, carried as text so the error stays `Clone`.
    Io(String),

    /// Generic error with message.
    Other(String),
}

impl Error {
    /// Whether this error comes from configuration rather than input data.
    ///
    /// Configuration errors are detected before any clustering work starts
    /// and are never recoverable within a run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::DimensionMismatch { .. } | Error::InvalidParameter { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::InvalidInput { index, message } => {
                write!(f, "invalid point {index}: {message}")
            }
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
