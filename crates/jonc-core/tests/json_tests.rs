//! serde interop: JONC values through serde_json in both directions.

use jonc_core::{json, parse, Value};

#[test]
fn to_plain_json_drops_comments() {
    let doc = parse("{ // secret\n a: 1, b: [true, 'x'] }").unwrap();
    let json_value = json::to_json(&doc).unwrap();
    assert_eq!(json_value, serde_json::json!({ "a": 1, "b": [true, "x"] }));
}

#[test]
fn serialize_preserves_key_order() {
    let doc = parse("{ zebra: 1, apple: 2, mango: 3 }").unwrap();
    let text = serde_json::to_string(&doc).unwrap();
    assert_eq!(text, r#"{"zebra":1,"apple":2,"mango":3}"#);
}

#[test]
fn serialize_direct_to_string() {
    let doc = parse("{ a: 1.5, c: null }").unwrap();
    assert_eq!(
        serde_json::to_string(&doc).unwrap(),
        r#"{"a":1.5,"c":null}"#
    );
}

#[test]
fn from_json_round_trip() {
    let json_value = serde_json::json!({
        "name": "x",
        "items": [1, 2],
        "nested": { "flag": false, "ratio": 0.5 },
        "nothing": null,
    });
    let value = json::from_json(&json_value);
    assert_eq!(json::to_json(&value).unwrap(), json_value);
}

#[test]
fn deserialize_into_value() {
    let value: Value = serde_json::from_str(r#"{"a": [1, 2.5, "x"], "b": null}"#).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.recursive_get("b"), Some(&Value::Null));
    let Some(Value::Array(items)) = object.get("a") else {
        panic!("'a' should be an array");
    };
    assert_eq!(items[0], Value::from(1i64));
    assert_eq!(items[1], Value::from(2.5));
    assert_eq!(items[2], Value::from("x"));
}

#[test]
fn char_primitives_become_strings() {
    let value = Value::from('x');
    assert_eq!(json::to_json(&value).unwrap(), serde_json::json!("x"));
}

#[test]
fn huge_u64_falls_back_to_float() {
    let value: Value = serde_json::from_str("18446744073709551615").unwrap();
    assert_eq!(value, Value::from(u64::MAX as f64));
}
