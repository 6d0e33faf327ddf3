// Script builder integration tests
// Exercise the public API the way a host bridge drives it

use transit_core::{
    arguments, build_call, build_script, js_object, ErrorCode, JsRepresentable, NativeFunctionId,
    RemoteHandle, RemoteObject, ScriptBuilder, ScriptConfig, ScriptError, Value,
};

#[derive(Debug)]
struct Selector(&'static str);

impl JsRepresentable for Selector {
    fn js_representation(&self) -> String {
        format!("document.querySelector({})", transit_core::script::quote(self.0))
    }
}

#[cfg(test)]
mod event_dispatch_tests {
    use super::*;

    #[test]
    fn test_dispatch_event_with_callback() {
        let callback = Value::from(NativeFunctionId::new("17"));
        let payload = js_object! {
            "type" => "click",
            "target" => Value::capability(Selector("#save")),
            "done" => callback.clone(),
        };

        let script = build_call(
            Some(Value::from(RemoteHandle::object("dispatcher"))),
            Value::raw("this.dispatch"),
            vec![payload, callback],
        )
        .unwrap();

        assert_eq!(
            script,
            "(function() {\n  \
             var __TRANSIT_OBJECT_PROXY_dispatcher = transit.retained[\"dispatcher\"], \
             __TRANSIT_NATIVE_FUNCTION_17 = transit.nativeFunction(\"17\");\n  \
             return (function() {\n    \
             return this.dispatch({\"type\": \"click\", \
             \"target\": document.querySelector(\"#save\"), \
             \"done\": __TRANSIT_NATIVE_FUNCTION_17}, __TRANSIT_NATIVE_FUNCTION_17);\n  \
             }).call(__TRANSIT_OBJECT_PROXY_dispatcher);\n\
             })()"
        );
    }

    #[test]
    fn test_native_call_with_splat_arguments() {
        let script = build_script(
            "@.apply(null, [@])",
            &[
                Value::from(RemoteHandle::js_function("handler")),
                arguments![1, 2.5, "three", Value::Global],
            ],
        )
        .unwrap();

        assert!(script.contains("var __TRANSIT_JS_FUNCTION_handler = transit.retained[\"handler\"];"));
        assert!(script.contains("return __TRANSIT_JS_FUNCTION_handler.apply(null, [1, 2.5, \"three\", window]);"));
    }

    #[test]
    fn test_proxy_ids_needing_mangling() {
        let script = build_script("@", &[Value::from(RemoteHandle::object("a-b.c"))]).unwrap();
        assert_eq!(
            script,
            "(function() {\n  var __TRANSIT_OBJECT_PROXY_a_2d_b_2e_c = transit.retained[\"a-b.c\"];\n  \
             return __TRANSIT_OBJECT_PROXY_a_2d_b_2e_c;\n})()"
        );
    }

    #[test]
    fn test_unretained_object_without_id() {
        let object = RemoteObject::unretained(js_object! { "x" => 1, "y" => 2 });
        let script = build_script("move(@)", &[Value::Handle(RemoteHandle::Object(object))]).unwrap();
        assert_eq!(script, r#"move({"x": 1, "y": 2})"#);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    struct FileHandle;

    #[test]
    fn test_unencodable_value_names_type() {
        let err = build_script("@", &[Value::opaque::<FileHandle>()]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnencodableValue);
        match &err {
            ScriptError::UnencodableValue { type_name } => {
                assert!(type_name.ends_with("FileHandle"));
            }
            other => panic!("Expected UnencodableValue, got {:?}", other),
        }
        assert!(err.to_string().contains("Try to implement JsRepresentable"));
    }

    #[test]
    fn test_builder_recovers_after_error() {
        let mut builder = ScriptBuilder::new(None).unwrap();
        assert!(builder.process("x(@)", &[Value::opaque::<FileHandle>()]).is_err());

        builder.process("y(@)", &[Value::from(true)]).unwrap();
        assert_eq!(builder.to_script(), "y(true)");
    }

    #[test]
    fn test_invalid_config_json() {
        let err = ScriptConfig::from_json_str(r#"{"registry_variable": 5}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }
}
