// SPDX-License-Identifier: MPL-2.0
use crate::service::TransformRequestError;
use crate::studio::SelectionError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Selection(SelectionError),
    Transform(TransformRequestError),
}

impl Error {
    /// Returns the i18n message key used when this error is shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Selection(e) => e.i18n_key(),
            Error::Transform(e) => e.i18n_key(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Selection(e) => write!(f, "Selection Error: {}", e),
            Error::Transform(e) => write!(f, "Transform Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SelectionError> for Error {
    fn from(err: SelectionError) -> Self {
        Error::Selection(err)
    }
}

impl From<TransformRequestError> for Error {
    fn from(err: TransformRequestError) -> Self {
        Error::Transform(err)
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
