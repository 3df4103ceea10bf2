use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Failure conditions raised by vector and matrix operations.
///
/// Every variant is raised synchronously at the point of violation and no
/// operation retries internally. Unchecked indexing through `Index`/`IndexMut`
/// sits outside this taxonomy and panics like slice indexing does.
#[derive(Debug)]
pub enum Error {
    /// Construction with a zero or over-limit size or dimension.
    InvalidSize { size: usize, limit: usize },
    /// A source argument that cannot back a container, such as an empty slice.
    InvalidArgument(&'static str),
    /// Checked access outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Binary operation between containers of incompatible sizes.
    SizeMismatch { left: usize, right: usize },
    /// A row whose length differs from the matrix dimension.
    InvalidShape { row: usize, len: usize, expected: usize },
    /// Underlying stream failure while reading elements.
    Io(io::Error),
    /// A token that does not parse as an element value.
    Parse { token: String, index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidSize { size, limit } => {
                write!(f, "size {} is outside the valid range [1, {})", size, limit)
            }
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            }
            Error::SizeMismatch { left, right } => {
                write!(f, "operands have mismatched sizes {} and {}", left, right)
            }
            Error::InvalidShape { row, len, expected } => {
                write!(f, "row {} has length {}, expected {}", row, len, expected)
            }
            Error::Io(err) => write!(f, "failed to read elements: {}", err),
            Error::Parse { token, index } => {
                write!(f, "could not parse element {} from token '{}'", index, token)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
