use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// The score could not be read as a usable PDF.
    InvalidPdf(String),
    /// A page could not be embedded into the output document.
    Pdf(String),
    InvalidStaffCount(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidPdf(msg) => write!(f, "invalid score PDF: {msg}"),
            Error::Pdf(msg) => write!(f, "PDF error: {msg}"),
            Error::InvalidStaffCount(n) => {
                write!(f, "invalid number of staves: {n} (expected 0...6)")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
