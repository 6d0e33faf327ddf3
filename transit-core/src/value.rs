use bytes::Bytes;
use indexmap::IndexMap;
use serde_json::{Number, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

use crate::ids::{NativeFunctionId, ProxyId};

/// A native value that renders itself as a JavaScript expression.
///
/// The returned text is inserted verbatim; the serializer does not validate it.
pub trait JsRepresentable: Send + Sync + fmt::Debug {
    fn js_representation(&self) -> String;
}

/// Pre-rendered JavaScript expression text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpression(pub String);

impl JsRepresentable for RawExpression {
    fn js_representation(&self) -> String {
        self.0.clone()
    }
}

/// Values that can be serialized into a script
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Elements spliced into the surrounding text without brackets
    Arguments(Vec<Value>),
    /// Array-like byte buffer, emitted as a list of numbers
    Bytes(Bytes),
    Object(IndexMap<String, Value>),
    Capability(Arc<dyn JsRepresentable>),
    Handle(RemoteHandle),
    /// The global object of the script runtime
    Global,
    Opaque(OpaqueValue),
}

/// A value that already lives in the script runtime
#[derive(Debug, Clone)]
pub enum RemoteHandle {
    NativeFunction(NativeFunctionId),
    JsFunction(RemoteObject),
    Object(RemoteObject),
}

/// Proxy for a retained script-side object.
///
/// Without a proxy id the object was never retained, so `fallback` is
/// serialized in its place.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub proxy_id: Option<ProxyId>,
    pub fallback: Box<Value>,
}

/// A host value with no JavaScript encoding, identified by its type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueValue {
    pub type_name: String,
}

impl RemoteObject {
    pub fn retained(proxy_id: impl Into<ProxyId>) -> Self {
        Self {
            proxy_id: Some(proxy_id.into()),
            fallback: Box::new(Value::Null),
        }
    }

    pub fn unretained(fallback: impl Into<Value>) -> Self {
        Self {
            proxy_id: None,
            fallback: Box::new(fallback.into()),
        }
    }
}

impl RemoteHandle {
    pub fn native_function(id: impl Into<NativeFunctionId>) -> Self {
        RemoteHandle::NativeFunction(id.into())
    }

    pub fn js_function(id: impl Into<ProxyId>) -> Self {
        RemoteHandle::JsFunction(RemoteObject::retained(id))
    }

    pub fn object(id: impl Into<ProxyId>) -> Self {
        RemoteHandle::Object(RemoteObject::retained(id))
    }
}

impl Value {
    /// Build an argument list from any sequence of convertible items
    pub fn arguments<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Arguments(items.into_iter().map(Into::into).collect())
    }

    pub fn capability(capability: impl JsRepresentable + 'static) -> Self {
        Value::Capability(Arc::new(capability))
    }

    pub fn raw(expression: impl Into<String>) -> Self {
        Value::capability(RawExpression(expression.into()))
    }

    /// Stand-in for a host value of type `T` that has no encoding
    pub fn opaque<T: ?Sized>() -> Self {
        Value::Opaque(OpaqueValue {
            type_name: std::any::type_name::<T>().to_string(),
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Arguments(_) => "arguments",
            Value::Bytes(_) => "bytes",
            Value::Object(_) => "object",
            Value::Capability(_) => "capability",
            Value::Handle(_) => "handle",
            Value::Global => "global",
            Value::Opaque(opaque) => &opaque.type_name,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// NaN and infinities have no JSON number form and become `Null`
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl<T: Into<Value>> From<IndexMap<String, T>> for Value {
    fn from(value: IndexMap<String, T>) -> Self {
        Value::Object(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<RemoteHandle> for Value {
    fn from(value: RemoteHandle) -> Self {
        Value::Handle(value)
    }
}

impl From<NativeFunctionId> for Value {
    fn from(value: NativeFunctionId) -> Self {
        Value::Handle(RemoteHandle::NativeFunction(value))
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            JsonValue::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_finite_floats_become_null() {
        assert!(matches!(Value::from(f64::NAN), Value::Null));
        assert!(matches!(Value::from(f64::INFINITY), Value::Null));
        assert!(matches!(Value::from(1.5f64), Value::Number(_)));
    }

    #[test]
    fn test_option_conversion() {
        assert!(matches!(Value::from(None::<i32>), Value::Null));
        assert!(matches!(Value::from(Some("x")), Value::String(s) if s == "x"));
    }

    #[test]
    fn test_json_conversion_keeps_structure() {
        let value = Value::from(json!({"a": [1, true, null], "b": "c"}));
        match value {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert!(matches!(&map["a"], Value::Array(items) if items.len() == 3));
                assert!(matches!(&map["b"], Value::String(s) if s == "c"));
            }
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_arguments_constructor() {
        let args = Value::arguments(vec![1, 2, 3]);
        assert!(matches!(args, Value::Arguments(items) if items.len() == 3));
    }

    #[test]
    fn test_opaque_records_type_name() {
        let value = Value::opaque::<std::time::Instant>();
        assert_eq!(value.kind(), "std::time::Instant");
    }

    #[test]
    fn test_remote_object_constructors() {
        let retained = RemoteObject::retained("p1");
        assert_eq!(retained.proxy_id, Some(ProxyId::new("p1")));

        let unretained = RemoteObject::unretained(vec![1, 2]);
        assert!(unretained.proxy_id.is_none());
        assert!(matches!(*unretained.fallback, Value::Array(_)));
    }
}
