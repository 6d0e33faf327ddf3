// Property tests for the script serializer
// Emitted literals must read back to the values they encode

use indexmap::IndexMap;
use proptest::prelude::*;
use transit_core::{
    build_script, logging::init_test_logging, script::quote, RemoteHandle, ScriptBuilder, Value,
};

fn serialize(value: Value) -> String {
    build_script("@", &[value]).unwrap()
}

proptest! {
    #[test]
    fn strings_round_trip(s in any::<String>()) {
        let emitted = serialize(Value::from(s.clone()));
        let parsed: String = serde_json::from_str(&emitted).unwrap();
        prop_assert_eq!(parsed, s);
    }

    #[test]
    fn quoted_strings_never_contain_raw_line_terminators(s in any::<String>()) {
        let emitted = quote(&s);
        prop_assert!(!emitted.contains('\n'));
        prop_assert!(!emitted.contains('\r'));
        prop_assert!(!emitted.contains('\u{2028}'), "raw U+2028 in {:?}", emitted);
        prop_assert!(!emitted.contains('\u{2029}'), "raw U+2029 in {:?}", emitted);
        prop_assert!(!emitted.contains("</"));
    }

    #[test]
    fn integers_round_trip(n in any::<i64>()) {
        let emitted = serialize(Value::from(n));
        prop_assert_eq!(emitted.parse::<i64>().unwrap(), n);
    }

    #[test]
    fn floats_round_trip(f in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO) {
        let emitted = serialize(Value::from(f));
        prop_assert_eq!(emitted.parse::<f64>().unwrap(), f);
    }

    #[test]
    fn booleans_round_trip(b in any::<bool>()) {
        let emitted = serialize(Value::from(b));
        prop_assert_eq!(emitted.parse::<bool>().unwrap(), b);
    }

    #[test]
    fn map_keys_appear_once(keys in proptest::collection::hash_set(any::<String>(), 0..8)) {
        let mut map = IndexMap::new();
        for (i, key) in keys.iter().enumerate() {
            map.insert(key.clone(), Value::from(i));
        }

        let emitted = serialize(Value::Object(map));
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&emitted).unwrap();

        prop_assert_eq!(parsed.len(), keys.len());
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(parsed.get(key).and_then(|v| v.as_u64()), Some(i as u64));
        }
    }

    #[test]
    fn sequences_are_bracketed_unless_arguments(items in proptest::collection::vec(any::<i32>(), 0..10)) {
        let expected = items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let list = serialize(Value::from(items.clone()));
        prop_assert_eq!(list, format!("[{}]", expected));

        let call = build_script("f(@)", &[Value::arguments(items)]).unwrap();
        prop_assert_eq!(call, format!("f({})", expected));
    }

    #[test]
    fn handle_is_declared_once(n in 2usize..20, id in "[a-z0-9]{1,8}") {
        let handle = Value::from(RemoteHandle::object(id.as_str()));
        let args = vec![handle; n];
        let template = vec!["@"; n].join(" + ");

        let mut builder = ScriptBuilder::new(None).unwrap();
        builder.process(&template, &args).unwrap();
        let script = builder.to_script();

        let name = format!("__TRANSIT_OBJECT_PROXY_{}", id);
        let initializer = format!("{} = transit.retained[\"{}\"]", name, id);
        prop_assert_eq!(script.matches(&initializer).count(), 1);
        prop_assert_eq!(script.matches(&name).count(), n + 1);
        prop_assert_eq!(builder.binding_names().count(), 1);
    }
}

#[test]
fn test_logging_does_not_change_output() {
    init_test_logging();

    let script = build_script("@", &[Value::from(vec![1, 2, 3])]).unwrap();
    assert_eq!(script, "[1, 2, 3]");
}
