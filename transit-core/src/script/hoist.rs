// Handle hoisting
// Each remote handle is declared once per script as a `var` binding and
// referenced by name at every use site.

use indexmap::IndexSet;
use std::fmt::Write;
use tracing::trace;

use super::emitter::write_quoted;
use crate::config::ScriptConfig;

/// Which lookup a binding resolves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    NativeFunction,
    JsFunction,
    ObjectProxy,
}

impl BindingKind {
    pub fn prefix(self, config: &ScriptConfig) -> &str {
        match self {
            BindingKind::NativeFunction => &config.native_function_prefix,
            BindingKind::JsFunction => &config.js_function_prefix,
            BindingKind::ObjectProxy => &config.object_proxy_prefix,
        }
    }
}

/// Deterministic binding name for a handle: kind prefix plus mangled id
pub fn binding_name(config: &ScriptConfig, kind: BindingKind, id: &str) -> String {
    let mut name = String::from(kind.prefix(config));
    mangle_into(&mut name, id);
    name
}

/// Expression that resolves the handle in the script runtime
pub fn initializer(config: &ScriptConfig, kind: BindingKind, id: &str) -> String {
    let mut init = String::from(&config.registry_variable);
    match kind {
        BindingKind::NativeFunction => {
            init.push_str(".nativeFunction(");
            write_quoted(&mut init, id);
            init.push(')');
        }
        BindingKind::JsFunction | BindingKind::ObjectProxy => {
            init.push_str(".retained[");
            write_quoted(&mut init, id);
            init.push(']');
        }
    }
    init
}

// ASCII alphanumerics pass through; anything else, `_` included, becomes
// `_<hex>_`, so distinct ids always produce distinct identifiers.
fn mangle_into(out: &mut String, id: &str) {
    for c in id.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            let _ = write!(out, "_{:x}_", c as u32);
        }
    }
}

/// Position to roll back to when a serialization fails halfway
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    declarations_len: usize,
    declared: usize,
}

/// Declared bindings of one script, in first-use order
#[derive(Debug, Default)]
pub struct Bindings {
    declarations: String,
    declared: IndexSet<String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the binding for `(kind, id)` unless it already exists, and
    /// return its name for the use site.
    pub fn hoist(&mut self, config: &ScriptConfig, kind: BindingKind, id: &str) -> String {
        let name = binding_name(config, kind, id);

        if self.declared.contains(&name) {
            trace!("Reusing binding {}", name);
            return name;
        }

        if self.declared.is_empty() {
            self.declarations.push_str("var ");
        } else {
            self.declarations.push_str(", ");
        }

        let init = initializer(config, kind, id);
        trace!("Hoisting binding {} = {}", name, init);

        self.declarations.push_str(&name);
        self.declarations.push_str(" = ");
        self.declarations.push_str(&init);
        self.declared.insert(name.clone());

        name
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Binding names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    /// The combined `var a = ..., b = ...` declaration, without a semicolon
    pub fn declarations(&self) -> &str {
        &self.declarations
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            declarations_len: self.declarations.len(),
            declared: self.declared.len(),
        }
    }

    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.declarations.truncate(checkpoint.declarations_len);
        self.declared.truncate(checkpoint.declared);
    }
}
