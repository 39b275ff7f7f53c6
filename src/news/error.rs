use std::error;
use std::fmt;

#[derive(Debug)]
pub enum NewsError {
    Io(std::io::Error),
    JsonParse(serde_json::Error),
    NotFound(String),
}

impl fmt::Display for NewsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NewsError::Io(ref err) => write!(f, "IO Error: {}", err),
            NewsError::JsonParse(ref err) => write!(f, "JSON Parse Error: {}", err),
            NewsError::NotFound(ref id) => write!(f, "Not Found: no post with id '{}'", id),
        }
    }
}

impl error::Error for NewsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            NewsError::Io(ref err) => Some(err),
            NewsError::JsonParse(ref err) => Some(err),
            NewsError::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for NewsError {
    fn from(err: std::io::Error) -> NewsError {
        NewsError::Io(err)
    }
}

impl From<serde_json::Error> for NewsError {
    fn from(err: serde_json::Error) -> NewsError {
        NewsError::JsonParse(err)
    }
}
