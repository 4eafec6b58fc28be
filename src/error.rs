use std::{error::Error as StdError, fmt};

#[derive(Debug)]
pub enum Error {
    /// A text part was given a blank name, value or content type.
    InvalidTextPart,
    /// A file part was given a blank name, mime type or file name,
    /// or empty content under [`EmptyFilePolicy::Reject`](crate::EmptyFilePolicy).
    InvalidFilePart,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidTextPart => {
                write!(f, "Name, value and contentType cannot be null or empty")
            }
            Error::InvalidFilePart => {
                write!(f, "Name, file, mimeType, and fileName cannot be null or empty")
            }
        }
    }
}

impl StdError for Error {
    fn description(&self) -> &'static str {
        match *self {
            Error::InvalidTextPart => "A required field of a text part was blank",
            Error::InvalidFilePart => "A required field of a file part was blank",
        }
    }
}
