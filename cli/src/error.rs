use pathmesh::tessellation::TessellationError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    /// A line of the input path that could not be understood.
    Parse { line: usize, message: String },
    Argument(String),
    Format(String),
    Tessellation(TessellationError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{}", e),
            CliError::Parse { line, message } => write!(f, "line {}: {}", line, message),
            CliError::Argument(message) => write!(f, "{}", message),
            CliError::Format(message) => write!(f, "invalid output format: {}", message),
            CliError::Tessellation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<TessellationError> for CliError {
    fn from(err: TessellationError) -> Self {
        CliError::Tessellation(err)
    }
}

impl From<regex::Error> for CliError {
    fn from(err: regex::Error) -> Self {
        CliError::Format(err.to_string())
    }
}
