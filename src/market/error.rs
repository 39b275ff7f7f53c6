use std::error;
use std::fmt;

#[derive(Debug)]
pub enum MarketFetchError {
    HttpRequest(reqwest::Error),
    HttpStatus(reqwest::StatusCode),
    JsonParse(serde_json::Error),
    EmptyBody,
}

impl fmt::Display for MarketFetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MarketFetchError::HttpRequest(ref err) => write!(f, "HTTP Request Error: {}", err),
            MarketFetchError::HttpStatus(status) => write!(f, "HTTP Status Error: {}", status),
            MarketFetchError::JsonParse(ref err) => write!(f, "JSON Parse Error: {}", err),
            MarketFetchError::EmptyBody => write!(f, "Empty Body Error: no assets in response"),
        }
    }
}

impl error::Error for MarketFetchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            MarketFetchError::HttpRequest(ref err) => Some(err),
            MarketFetchError::JsonParse(ref err) => Some(err),
            MarketFetchError::HttpStatus(_) | MarketFetchError::EmptyBody => None,
        }
    }
}

impl From<reqwest::Error> for MarketFetchError {
    fn from(err: reqwest::Error) -> MarketFetchError {
        MarketFetchError::HttpRequest(err)
    }
}

impl From<serde_json::Error> for MarketFetchError {
    fn from(err: serde_json::Error) -> MarketFetchError {
        MarketFetchError::JsonParse(err)
    }
}
