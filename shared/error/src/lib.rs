use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use serde_urlencoded::ser::Error as UrlEncodedError;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    io::Error as IoError,
    num::ParseFloatError,
};
use url::ParseError as UrlParseError;

/// Coarse category of a failure, used by callers to pick a policy
/// (retry, abort the submission, terminate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The exchange answered with `success: false`.
    RemoteRejection,
    /// No trade history for the requested side.
    InsufficientData,
    InvalidTicker,
    /// Transport failure before an envelope was received.
    Network,
    UnsuccessfulResponse,
    Parse,
    Config,
    Io,
    Assert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutotraderError {
    pub kind: ErrorKind,
    pub title: String,
    pub description: String,
}

impl AutotraderError {
    pub fn new(kind: ErrorKind, title: String, description: String) -> Self {
        Self {
            kind,
            title,
            description,
        }
    }

    pub fn new_remote_rejection(message: String) -> Self {
        Self {
            kind: ErrorKind::RemoteRejection,
            title: String::from("Bittrex response"),
            description: message,
        }
    }

    pub fn new_insufficient_data(description: String) -> Self {
        Self {
            kind: ErrorKind::InsufficientData,
            title: String::from("Insufficient Data"),
            description,
        }
    }

    pub fn new_invalid_ticker(description: String) -> Self {
        Self {
            kind: ErrorKind::InvalidTicker,
            title: String::from("Invalid Ticker"),
            description,
        }
    }

    pub fn new_network(description: String) -> Self {
        Self {
            kind: ErrorKind::Network,
            title: String::from("Network Error"),
            description,
        }
    }

    pub fn new_unsuccessful_response(description: String) -> Self {
        Self {
            kind: ErrorKind::UnsuccessfulResponse,
            title: String::from("Unsuccessful Response"),
            description,
        }
    }

    pub fn new_config(description: String) -> Self {
        Self {
            kind: ErrorKind::Config,
            title: String::from("Invalid Configuration"),
            description,
        }
    }

    pub fn new_assert_error<T: Display>(assertion: T) -> Self {
        Self {
            kind: ErrorKind::Assert,
            title: String::from("Assert Error"),
            description: format!("{} not valid!", assertion),
        }
    }

    #[inline]
    pub fn is_remote_rejection(&self) -> bool {
        self.kind == ErrorKind::RemoteRejection
    }

    /// Only transport failures are worth repeating; anything the exchange
    /// actually answered is final.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

impl Display for AutotraderError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl Error for AutotraderError {}

impl From<UrlParseError> for AutotraderError {
    fn from(error: UrlParseError) -> Self {
        Self::new(
            ErrorKind::Config,
            String::from("Url Parse Error"),
            error.to_string(),
        )
    }
}

impl From<SerdeError> for AutotraderError {
    fn from(error: SerdeError) -> Self {
        Self::new(
            ErrorKind::Parse,
            String::from("Serde Error"),
            error.to_string(),
        )
    }
}

impl From<ParseFloatError> for AutotraderError {
    fn from(error: ParseFloatError) -> Self {
        Self::new(
            ErrorKind::Parse,
            String::from("Parse Float Error"),
            error.to_string(),
        )
    }
}

impl From<ReqwestError> for AutotraderError {
    fn from(error: ReqwestError) -> Self {
        let kind = if error.is_decode() {
            ErrorKind::Parse
        } else {
            ErrorKind::Network
        };
        Self::new(kind, String::from("Reqwest Error"), error.to_string())
    }
}

impl From<UrlEncodedError> for AutotraderError {
    fn from(error: UrlEncodedError) -> Self {
        Self::new(
            ErrorKind::Parse,
            String::from("Url Encoded Error"),
            error.to_string(),
        )
    }
}

impl From<IoError> for AutotraderError {
    fn from(error: IoError) -> Self {
        Self::new(ErrorKind::Io, String::from("I/O Error"), error.to_string())
    }
}

#[macro_export]
macro_rules! assert_or_error {
    ($cond:expr) => {
        if !$cond {
            return Err($crate::AutotraderError::new_assert_error(stringify!($cond)));
        }
    };
}
