//! Parser behavior: grammar leniencies, comment attribution, escapes, and
//! error reporting.

use jonc_core::{parse, parse_object, Object, Primitive, Value};

// ============================================================================
// Basic comprehension
// ============================================================================

#[test]
fn two_keys_single_quotes() {
    let object = parse_object("{\n  'foo': 'bar',\n  'baz':'bux'\n}").unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object.get("foo"), Some(&Value::from("bar")));
    assert_eq!(object.get("baz"), Some(&Value::from("bux")));
    assert_eq!(object.get("bar"), None);
}

#[test]
fn object_content_categories() {
    let object = parse_object(
        "{ 'a': 'hello', 'b': 42, 'c': 42.0, 'd': {}, 'e': [], 'f': true, 'g': false, 'h': null }",
    )
    .unwrap();
    assert_eq!(object.len(), 8);
    assert_eq!(object.get("a"), Some(&Value::from("hello")));
    assert_eq!(object.get("b"), Some(&Value::Primitive(Primitive::Int(42))));
    assert_eq!(
        object.get("c"),
        Some(&Value::Primitive(Primitive::Float(42.0)))
    );
    // Intended quirk: 42 and 42.0 are different values.
    assert_ne!(object.get("b"), object.get("c"));
    assert_eq!(object.get("d"), Some(&Value::Object(Object::new())));
    assert_eq!(object.get("e"), Some(&Value::Array(Vec::new())));
    assert_eq!(object.get("f"), Some(&Value::from(true)));
    assert_eq!(object.get("g"), Some(&Value::from(false)));
    assert_eq!(object.get("h"), Some(&Value::Null));
}

#[test]
fn array_content_categories() {
    let object = parse_object("{ 'a': ['hello', 42, 42.0, {}, [], true, false, null] }").unwrap();
    let Some(Value::Array(items)) = object.get("a") else {
        panic!("'a' should be an array");
    };
    assert_eq!(items.len(), 8);
    assert_eq!(items[0], Value::from("hello"));
    assert_eq!(items[1], Value::Primitive(Primitive::Int(42)));
    assert_eq!(items[2], Value::Primitive(Primitive::Float(42.0)));
    assert_eq!(items[3], Value::Object(Object::new()));
    assert_eq!(items[4], Value::Array(Vec::new()));
    assert_eq!(items[7], Value::Null);
}

#[test]
fn root_may_be_any_value() {
    assert_eq!(parse("42").unwrap(), Value::Primitive(Primitive::Int(42)));
    assert_eq!(parse(" // note\n true ").unwrap(), Value::from(true));
    assert_eq!(parse("[1]").unwrap(), Value::Array(vec![Value::from(1i64)]));
    assert!(parse_object("[1]").is_err());
}

// ============================================================================
// Comment attribution
// ============================================================================

#[test]
fn comments_attach_to_the_following_key() {
    for text in [
        "{ /* Hello World */ 'foo': true }",
        "{ /*Hello World */ 'foo': true }",
        "{ //\tHello World \n 'foo': true }",
    ] {
        let object = parse_object(text).unwrap();
        assert_eq!(object.comment("foo"), Some("Hello World"), "input: {text}");
    }
}

#[test]
fn consecutive_comments_join_with_newlines() {
    let object = parse_object("{ // one\n // two\n foo: 1 }").unwrap();
    assert_eq!(object.comment("foo"), Some("one\ntwo"));
}

#[test]
fn uncommented_entries_have_no_comment() {
    let object = parse_object("{ /* noted */ a: 1, b: 2 }").unwrap();
    assert_eq!(object.comment("a"), Some("noted"));
    assert_eq!(object.comment("b"), None);
}

#[test]
fn comments_inside_arrays_are_discarded() {
    let doc = parse("[ /* noise */ 1, // more noise\n 2 ]").unwrap();
    assert_eq!(
        doc,
        Value::Array(vec![Value::from(1i64), Value::from(2i64)])
    );
}

// ============================================================================
// Grammar leniencies
// ============================================================================

#[test]
fn unquoted_keys_and_optional_commas() {
    let doc =
        parse("{ mods: [{name: 'alf' version:'1.12.2_v143.6'} {name:'bux', version:false}]}")
            .unwrap();
    let object = doc.as_object().unwrap();
    let Some(Value::Array(mods)) = object.recursive_get("mods") else {
        panic!("mods should be an array");
    };
    assert_eq!(mods.len(), 2);
    let first = mods[0].as_object().unwrap();
    assert_eq!(first.get("name"), Some(&Value::from("alf")));
    assert_eq!(first.get("version"), Some(&Value::from("1.12.2_v143.6")));
    let second = mods[1].as_object().unwrap();
    assert_eq!(second.get("version"), Some(&Value::from(false)));
}

#[test]
fn trailing_commas_are_tolerated() {
    assert_eq!(
        parse("{ a: 1, }").unwrap(),
        parse("{ a: 1 }").unwrap()
    );
    assert_eq!(
        parse("[1, 2,]").unwrap(),
        parse("[1, 2]").unwrap()
    );
}

#[test]
fn duplicate_keys_keep_position_last_value_wins() {
    let object = parse_object("{ a: 1, b: 2, a: 3 }").unwrap();
    let keys: Vec<&str> = object.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(object.get("a"), Some(&Value::from(3i64)));
}

#[test]
fn negative_numbers() {
    let object = parse_object("{ 'foo': -1, 'bar': [ -1, -3 ] }").unwrap();
    assert_eq!(object.get("foo"), Some(&Value::from(-1i64)));
    assert_eq!(
        object.get("bar"),
        Some(&Value::Array(vec![Value::from(-1i64), Value::from(-3i64)]))
    );
}

#[test]
fn exponents_and_huge_integers_become_floats() {
    assert_eq!(
        parse("1e3").unwrap(),
        Value::Primitive(Primitive::Float(1000.0))
    );
    assert_eq!(
        parse("99999999999999999999").unwrap(),
        Value::Primitive(Primitive::Float(1e20))
    );
}

// ============================================================================
// Deep nesting
// ============================================================================

#[test]
fn recursive_get_walks_dotted_paths() {
    let doc = parse("{ a: { a: { a: { a: { a: { a: { a: { a: 'Hello' } } } } } } } }").unwrap();
    let object = doc.as_object().unwrap();
    assert_eq!(
        object.recursive_get("a.a.a.a.a.a.a.a"),
        Some(&Value::from("Hello"))
    );
    assert_eq!(object.recursive_get("a.a.a.a.a.a.a.a.a"), None);
    assert_eq!(object.recursive_get("a.b"), None);
}

// ============================================================================
// String escapes
// ============================================================================

#[test]
fn standard_escapes() {
    let object = parse_object(r#"{ s: "a\nb\tc\u0041\\d\"e" }"#).unwrap();
    assert_eq!(object.get("s"), Some(&Value::from("a\nb\tcA\\d\"e")));
}

#[test]
fn surrogate_pairs_combine() {
    let object = parse_object(r#"{ e: "\uD83C\uDF29" }"#).unwrap();
    assert_eq!(object.get("e"), Some(&Value::from("\u{1F329}")));
}

#[test]
fn unpaired_surrogates_are_errors() {
    assert!(parse(r#"{ e: "\uD83C" }"#).is_err());
    assert!(parse(r#"{ e: "\uDF29" }"#).is_err());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn errors_carry_line_numbers() {
    let err = parse("{\n  bad: @\n}").unwrap_err();
    assert_eq!(err.line(), 2);

    let err = parse("{\n a: 1,\n b: 2,\n c:\n}").unwrap_err();
    assert_eq!(err.line(), 5);
}

#[test]
fn unterminated_constructs_are_errors() {
    assert!(parse("{ 'a': 'b").is_err());
    assert!(parse("{ a: 1").is_err());
    assert!(parse("[1, 2").is_err());
    assert!(parse("{ /* never closed").is_err());
}

#[test]
fn trailing_garbage_is_an_error() {
    assert!(parse("{ a: 1 } extra").is_err());
    assert!(parse("42abc").is_err());
}

#[test]
fn unknown_identifiers_are_errors() {
    assert!(parse("{ a: yes }").is_err());
    assert!(parse("maybe").is_err());
}
