//! Serializes native values into JavaScript expressions for injection into a
//! hosted script engine.
//!
//! Remote handles are hoisted into `var` bindings so each one is looked up
//! once per script, and an optional receiver wraps the expression in a
//! `.call(this)` closure.
//!
//! ```rust
//! use transit_core::{RemoteHandle, ScriptBuilder, Value};
//!
//! let element = Value::from(RemoteHandle::object("42"));
//! let mut builder = ScriptBuilder::new(None)?;
//! builder.process("@.contains(@)", &[element.clone(), element])?;
//! assert_eq!(
//!     builder.to_script(),
//!     "(function() {\n  var __TRANSIT_OBJECT_PROXY_42 = transit.retained[\"42\"];\n  \
//!      return __TRANSIT_OBJECT_PROXY_42.contains(__TRANSIT_OBJECT_PROXY_42);\n})()"
//! );
//! # Ok::<(), transit_core::ScriptError>(())
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod macros;
pub mod script;
pub mod value;

#[doc(hidden)]
pub use indexmap;

pub use config::ScriptConfig;
pub use error::{ErrorCode, ScriptError};
pub use ids::{NativeFunctionId, ProxyId};
pub use script::{build_call, build_script, ScriptBuilder};
pub use value::{JsRepresentable, OpaqueValue, RawExpression, RemoteHandle, RemoteObject, Value};
