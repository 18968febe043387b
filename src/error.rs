// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Translation(String),
    Bangumi(BangumiError),
}

/// Failures talking to the Bangumi collection API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BangumiError {
    /// No username configured, so there is no collection to fetch.
    MissingUsername,

    /// The HTTP client could not be built or the request never completed.
    Request(String),

    /// The API answered with a non-success status code.
    Status(u16),

    /// The response body was not the expected JSON shape.
    Decode(String),
}

impl BangumiError {
    /// Categorizes a `reqwest` failure.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            return BangumiError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return BangumiError::Status(status.as_u16());
        }
        BangumiError::Request(err.to_string())
    }
}

impl fmt::Display for BangumiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BangumiError::MissingUsername => write!(f, "No Bangumi username configured"),
            BangumiError::Request(msg) => write!(f, "Request failed: {}", msg),
            BangumiError::Status(code) => write!(f, "HTTP status: {}", code),
            BangumiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for BangumiError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Translation(e) => write!(f, "Translation Error: {}", e),
            Error::Bangumi(e) => write!(f, "Bangumi Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<BangumiError> for Error {
    fn from(err: BangumiError) -> Self {
        Error::Bangumi(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let toml_error = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = toml_error.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn bangumi_error_wraps_into_crate_error() {
        let err: Error = BangumiError::Status(503).into();
        assert_eq!(format!("{}", err), "Bangumi Error: HTTP status: 503");
    }
}
