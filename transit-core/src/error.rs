use std::fmt;

/// Machine-readable classification of a [`ScriptError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnencodableValue,
    InvalidConfig,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::UnencodableValue => "unencodable_value",
            ErrorCode::InvalidConfig => "invalid_config",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while building a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// A value of a kind the serializer has no rule for
    #[error("Can't convert {type_name} to JavaScript. Try to implement JsRepresentable.")]
    UnencodableValue { type_name: String },

    #[error("Invalid script configuration: {0}")]
    Config(String),
}

impl ScriptError {
    pub fn unencodable(type_name: impl Into<String>) -> Self {
        ScriptError::UnencodableValue {
            type_name: type_name.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ScriptError::Config(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScriptError::UnencodableValue { .. } => ErrorCode::UnencodableValue,
            ScriptError::Config(_) => ErrorCode::InvalidConfig,
        }
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::config(format!("JSON error: {}", err))
    }
}
