//! Macros for building values with less boilerplate

/// Build an argument list, spliced into templates without brackets
///
/// # Example
///
/// ```rust
/// use transit_core::{arguments, build_script};
/// let script = build_script("f(@)", &[arguments![5, "hello", true]]).unwrap();
/// assert_eq!(script, r#"f(5, "hello", true)"#);
/// ```
#[macro_export]
macro_rules! arguments {
    [$($expr:expr),* $(,)?] => {
        $crate::Value::Arguments(vec![$($crate::Value::from($expr)),*])
    };
}

/// Build an object value with keys in the order written
///
/// # Example
///
/// ```rust
/// use transit_core::{js_object, build_script};
/// let value = js_object! {
///     "name" => "transit",
///     "retries" => 3,
/// };
/// let script = build_script("@", &[value]).unwrap();
/// assert_eq!(script, r#"{"name": "transit", "retries": 3}"#);
/// ```
#[macro_export]
macro_rules! js_object {
    { $($key:expr => $value:expr),* $(,)? } => {{
        let mut fields = $crate::indexmap::IndexMap::<String, $crate::Value>::new();
        $(
            fields.insert($key.to_string(), $crate::Value::from($value));
        )*
        $crate::Value::Object(fields)
    }};
}
