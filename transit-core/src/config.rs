use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// Names the generated script uses to reach the script-side runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Global variable exposing `nativeFunction(id)` and `retained[id]`
    pub registry_variable: String,
    /// Identifier emitted for the global context marker
    pub global_object: String,
    pub native_function_prefix: String,
    pub js_function_prefix: String,
    pub object_proxy_prefix: String,
    /// Marker replaced by positional arguments in templates
    pub placeholder: char,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            registry_variable: "transit".to_string(),
            global_object: "window".to_string(),
            native_function_prefix: "__TRANSIT_NATIVE_FUNCTION_".to_string(),
            js_function_prefix: "__TRANSIT_JS_FUNCTION_".to_string(),
            object_proxy_prefix: "__TRANSIT_OBJECT_PROXY_".to_string(),
            placeholder: '@',
        }
    }
}

impl ScriptConfig {
    /// Parse and validate a configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let config: ScriptConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScriptError> {
        let names = [
            ("registry_variable", &self.registry_variable),
            ("global_object", &self.global_object),
            ("native_function_prefix", &self.native_function_prefix),
            ("js_function_prefix", &self.js_function_prefix),
            ("object_proxy_prefix", &self.object_proxy_prefix),
        ];

        for (field, name) in names {
            if !is_identifier(name) {
                return Err(ScriptError::config(format!(
                    "{} must be a JavaScript identifier, got {:?}",
                    field, name
                )));
            }
        }

        let prefixes = [
            &self.native_function_prefix,
            &self.js_function_prefix,
            &self.object_proxy_prefix,
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                // A prefix extending another could alias binding names.
                if a.starts_with(b.as_str()) || b.starts_with(a.as_str()) {
                    return Err(ScriptError::config(format!(
                        "binding prefixes {:?} and {:?} overlap",
                        a, b
                    )));
                }
            }
        }

        if !self.placeholder.is_ascii() || self.placeholder.is_ascii_alphanumeric() {
            return Err(ScriptError::config(format!(
                "placeholder must be ASCII punctuation, got {:?}",
                self.placeholder
            )));
        }

        Ok(())
    }
}

// ECMAScript reserved words plus the literals that cannot be rebound
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_identifier(name: &str) -> bool {
    if RESERVED_WORDS.contains(&name) {
        return false;
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
