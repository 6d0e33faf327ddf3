// Script builder
// Classifies values, drives the emitter and the hoister, and assembles the
// final script around the accumulated expression.

use tracing::{debug, trace, warn};

use super::emitter::Emitter;
use super::hoist::{BindingKind, Bindings, Checkpoint};
use super::template::{placeholder_count, segments, Segment};
use crate::config::ScriptConfig;
use crate::error::ScriptError;
use crate::value::{RemoteHandle, RemoteObject, Value};

/// Builds one JavaScript expression from templates and values.
///
/// A builder is single use: once [`ScriptBuilder::to_script`] has run, the
/// result is cached and further `process` or `serialize` calls are ignored.
#[derive(Debug)]
pub struct ScriptBuilder {
    config: ScriptConfig,
    expression: Emitter,
    bindings: Bindings,
    this_expression: Option<String>,
    result: Option<String>,
}

impl ScriptBuilder {
    /// Create a builder whose expression runs with `this` as its receiver.
    ///
    /// `None`, `Value::Null` and `Value::Global` all mean the default context.
    pub fn new(this: Option<Value>) -> Result<Self, ScriptError> {
        Self::with_config(ScriptConfig::default(), this)
    }

    pub fn with_config(config: ScriptConfig, this: Option<Value>) -> Result<Self, ScriptError> {
        config.validate()?;

        let mut builder = Self {
            config,
            expression: Emitter::new(),
            bindings: Bindings::new(),
            this_expression: None,
            result: None,
        };

        match this {
            None | Some(Value::Null) | Some(Value::Global) => {}
            Some(this) => {
                builder.write_value(&this)?;
                let this_expression = builder.expression.take();
                trace!("Serialized context expression: {}", this_expression);
                builder.this_expression = Some(this_expression);
            }
        }

        Ok(builder)
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Substitute `args` for the placeholders of `template` and append the
    /// result to the expression.
    ///
    /// Placeholders beyond the last argument are kept literally. On error
    /// the builder is restored to its state before the call.
    pub fn process(&mut self, template: &str, args: &[Value]) -> Result<(), ScriptError> {
        if self.is_finalized() {
            warn!("Ignoring template on finalized script builder: {:?}", template);
            return Ok(());
        }

        let checkpoint = self.checkpoint();
        let marker = self.config.placeholder;

        let placeholders = placeholder_count(template, marker);
        if placeholders > args.len() {
            trace!(
                "Template has {} placeholders but {} arguments, keeping the rest literally",
                placeholders,
                args.len()
            );
        }

        for segment in segments(template, marker) {
            let outcome = match segment {
                Segment::Literal(text) => {
                    self.expression.push_raw(text);
                    Ok(())
                }
                Segment::Placeholder(index) => match args.get(index) {
                    Some(value) => self.write_value(value),
                    None => {
                        self.expression.push_char(marker);
                        Ok(())
                    }
                },
            };

            if let Err(err) = outcome {
                self.rollback(checkpoint);
                return Err(err);
            }
        }

        Ok(())
    }

    /// Append the serialized form of a single value to the expression
    pub fn serialize(&mut self, value: &Value) -> Result<(), ScriptError> {
        if self.is_finalized() {
            warn!("Ignoring {} value on finalized script builder", value.kind());
            return Ok(());
        }

        let checkpoint = self.checkpoint();
        self.write_value(value).inspect_err(|_| self.rollback(checkpoint))
    }

    /// Produce the final script. The first call assembles and caches it;
    /// later calls return the cached text.
    pub fn to_script(&mut self) -> &str {
        if self.result.is_none() {
            let script = self.assemble();
            debug!(
                "Finalized script: {} bytes, {} bindings, context: {}",
                script.len(),
                self.bindings.len(),
                self.this_expression.is_some()
            );
            self.result = Some(script);
        }

        self.result.as_deref().unwrap_or_default()
    }

    pub fn into_script(mut self) -> String {
        self.to_script();
        self.result.unwrap_or_default()
    }

    pub fn is_finalized(&self) -> bool {
        self.result.is_some()
    }

    /// Names of the hoisted bindings, in declaration order
    pub fn binding_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.names()
    }

    pub fn this_expression(&self) -> Option<&str> {
        self.this_expression.as_deref()
    }

    fn assemble(&self) -> String {
        let has_bindings = !self.bindings.is_empty();
        let mut output = String::with_capacity(
            self.expression.len()
                + self.bindings.declarations().len()
                + self.this_expression.as_ref().map_or(0, String::len)
                + 64,
        );

        if has_bindings {
            output.push_str("(function() {\n  ");
            output.push_str(self.bindings.declarations());
            output.push_str(";\n  return ");
        }

        match &self.this_expression {
            Some(this) => {
                output.push_str("(function() {\n    return ");
                output.push_str(self.expression.as_str());
                output.push_str(";\n  }).call(");
                output.push_str(this);
                output.push(')');
            }
            None => output.push_str(self.expression.as_str()),
        }

        if has_bindings {
            output.push_str(";\n})()");
        }

        output
    }

    fn write_value(&mut self, value: &Value) -> Result<(), ScriptError> {
        match value {
            Value::Capability(capability) => {
                self.expression.push_raw(&capability.js_representation());
            }
            Value::Handle(handle) => self.write_handle(handle)?,
            Value::Global => self.expression.push_raw(&self.config.global_object),
            Value::Null => self.expression.null(),
            Value::Array(items) => self.write_sequence(items, true)?,
            Value::Arguments(items) => self.write_sequence(items, false)?,
            Value::Bytes(bytes) => {
                let items: Vec<Value> = bytes.iter().map(|b| Value::from(*b)).collect();
                self.write_sequence(&items, true)?;
            }
            Value::Object(map) => {
                self.expression.begin_object();
                for (i, (key, entry)) in map.iter().enumerate() {
                    if i > 0 {
                        self.expression.separator();
                    }
                    self.expression.key(key);
                    self.write_value(entry)?;
                }
                self.expression.end_object();
            }
            Value::Number(n) => self.expression.number(n),
            Value::Bool(b) => self.expression.bool(*b),
            Value::String(s) => self.expression.string(s),
            Value::Opaque(opaque) => {
                warn!("Cannot serialize value of type {}", opaque.type_name);
                return Err(ScriptError::unencodable(&opaque.type_name));
            }
        }

        Ok(())
    }

    fn write_sequence(&mut self, items: &[Value], bracketed: bool) -> Result<(), ScriptError> {
        if bracketed {
            self.expression.begin_array();
        }

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.expression.separator();
            }
            self.write_value(item)?;
        }

        if bracketed {
            self.expression.end_array();
        }

        Ok(())
    }

    fn write_handle(&mut self, handle: &RemoteHandle) -> Result<(), ScriptError> {
        match handle {
            RemoteHandle::NativeFunction(id) => {
                self.write_binding(BindingKind::NativeFunction, id.as_str());
                Ok(())
            }
            RemoteHandle::JsFunction(object) => self.write_proxy(BindingKind::JsFunction, object),
            RemoteHandle::Object(object) => self.write_proxy(BindingKind::ObjectProxy, object),
        }
    }

    fn write_proxy(&mut self, kind: BindingKind, object: &RemoteObject) -> Result<(), ScriptError> {
        match &object.proxy_id {
            Some(id) => {
                self.write_binding(kind, id.as_str());
                Ok(())
            }
            None => self.write_value(&object.fallback),
        }
    }

    fn write_binding(&mut self, kind: BindingKind, id: &str) {
        let name = self.bindings.hoist(&self.config, kind, id);
        self.expression.push_raw(&name);
    }

    fn checkpoint(&self) -> (usize, Checkpoint) {
        (self.expression.len(), self.bindings.checkpoint())
    }

    fn rollback(&mut self, (expression_len, bindings): (usize, Checkpoint)) {
        self.expression.truncate(expression_len);
        self.bindings.rollback(bindings);
    }
}
