// Script generation
// Turns templates and native values into a single JavaScript expression for
// evaluation inside a hosted script engine.

pub mod builder;
pub mod emitter;
pub mod hoist;
pub mod template;


pub use builder::*;
pub use emitter::{quote, Emitter};
pub use hoist::{binding_name, initializer, BindingKind, Bindings};
pub use template::{placeholder_count, segments, Segment, Segments};

use crate::error::ScriptError;
use crate::value::Value;

/// Build a script from one template in the default context
pub fn build_script(template: &str, args: &[Value]) -> Result<String, ScriptError> {
    let mut builder = ScriptBuilder::new(None)?;
    builder.process(template, args)?;
    Ok(builder.into_script())
}

/// Build `function(args...)`, evaluated with `this` as the receiver
pub fn build_call(
    this: Option<Value>,
    function: Value,
    args: Vec<Value>,
) -> Result<String, ScriptError> {
    let mut builder = ScriptBuilder::new(this)?;
    builder.process("@(@)", &[function, Value::Arguments(args)])?;
    Ok(builder.into_script())
}
