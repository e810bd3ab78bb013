use std::fmt;

#[derive(Debug)]
pub enum FxError {
    Config(ConfigError),
    Dom(DomError),
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug)]
pub enum DomError {
    NoWindow,
    NoDocument,
    MissingElement { selector: String },
    WrongElementType { selector: String, expected: &'static str },
    NoContext { selector: String },
    Js(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::Config(e) => write!(f, "Config error: {e}"),
            FxError::Dom(e) => write!(f, "DOM error: {e}"),
        }
    }
}

impl std::error::Error for FxError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Invalid JSON: {e}"),
            ConfigError::InvalidValue { field, reason } => write!(f, "Invalid '{field}': {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::NoWindow => write!(f, "No global window"),
            DomError::NoDocument => write!(f, "Window has no document"),
            DomError::MissingElement { selector } => write!(f, "No element matches '{selector}'"),
            DomError::WrongElementType { selector, expected } => {
                write!(f, "Element '{selector}' is not a {expected}")
            }
            DomError::NoContext { selector } => write!(f, "Canvas '{selector}' has no 2d context"),
            DomError::Js(msg) => write!(f, "JS exception: {msg}"),
        }
    }
}

impl std::error::Error for DomError {}

impl From<ConfigError> for FxError {
    fn from(e: ConfigError) -> Self {
        FxError::Config(e)
    }
}

impl From<DomError> for FxError {
    fn from(e: DomError) -> Self {
        FxError::Dom(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        FxError::Config(ConfigError::Json(e))
    }
}
