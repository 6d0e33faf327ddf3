use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a native callable that the script side resolves through
/// `<registry>.nativeFunction(id)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeFunctionId(String);

/// Identifies an object retained by the script side in `<registry>.retained`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyId(String);

impl NativeFunctionId {
    pub fn new(value: impl Into<String>) -> Self {
        NativeFunctionId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProxyId {
    pub fn new(value: impl Into<String>) -> Self {
        ProxyId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NativeFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.0)
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proxy({})", self.0)
    }
}

impl From<&str> for NativeFunctionId {
    fn from(value: &str) -> Self {
        NativeFunctionId::new(value)
    }
}

impl From<String> for NativeFunctionId {
    fn from(value: String) -> Self {
        NativeFunctionId(value)
    }
}

impl From<u64> for NativeFunctionId {
    fn from(value: u64) -> Self {
        NativeFunctionId(value.to_string())
    }
}

impl From<&str> for ProxyId {
    fn from(value: &str) -> Self {
        ProxyId::new(value)
    }
}

impl From<String> for ProxyId {
    fn from(value: String) -> Self {
        ProxyId(value)
    }
}

impl From<u64> for ProxyId {
    fn from(value: u64) -> Self {
        ProxyId(value.to_string())
    }
}
