//! Document get/set/delete behavior, views, and encoding.

use dotson::{Document, Error};
use serde_json::{Value, json};

use crate::helpers::{ARRAY, DEEP, FLAT, MIXED, doc};

#[test]
fn test_get_flat_scalars() {
    let doc = doc(FLAT);
    let cases: Vec<(&str, Value)> = vec![
        ("a", json!(1)),
        ("b", json!("moo")),
        ("c", json!(true)),
        ("d", json!(1.2)),
        ("access_token", json!("123")),
    ];

    for (path, expected) in cases {
        assert_eq!(doc.get(path).unwrap(), expected, "{path}");
    }
}

#[test]
fn test_get_array_root() {
    let doc = doc(ARRAY);
    assert_eq!(doc.get("[0]").unwrap(), json!("foo"));
    assert_eq!(doc.get("[1].fruit").unwrap(), json!("apple"));
    assert_eq!(doc.root_kind(), "array");
}

#[test]
fn test_get_deeply_nested() {
    let doc = doc(DEEP);
    let cases: Vec<(&str, Value)> = vec![
        ("a.b.c.d", json!(1)),
        ("a.b.c.e", json!("moo")),
        ("a.b.c.f", json!(["cow", "dog", "bird"])),
        ("a.b.c.an-array[0]", json!(1)),
        ("a.b.c.foo-bar", json!("foobar")),
        ("a.b.c.g.x[0]", json!(0)),
        ("a.b.c.g.y[1]", json!(1.5)),
        ("a.b.c.g.z[0].a", json!("hello")),
        ("a.b.c.g.z[1].b", json!(200.24)),
        ("a.b.c.g.z[2].c", json!("it compiles")),
        ("a.b.c.h[0][0]", json!(1)),
        ("a.b.c.h[0][1]", json!(2)),
        ("a.b.c.h[0][2]", json!(3)),
        ("a.b.c.h[3][0][0]", json!("h")),
        ("a.b.c.h[3][1][2]", json!("m")),
    ];

    for (path, expected) in cases {
        assert_eq!(doc.get(path).unwrap(), expected, "{path}");
    }
}

#[test]
fn test_get_error_kinds() {
    let doc = doc(MIXED);

    // Descending through a scalar.
    assert!(doc.get("a.b.e").unwrap_err().is_type_mismatch());
    assert!(doc.get("d[2][0].b.e").unwrap_err().is_type_mismatch());
    // Indexing an object.
    assert!(doc.get("a[0]").unwrap_err().is_type_mismatch());
    // Missing keys at various depths.
    assert!(doc.get("a.f.m.a").unwrap_err().is_not_found());
    assert!(doc.get("d[1].b").unwrap_err().is_not_found());
    assert!(doc.get("d[2][0].c").unwrap_err().is_not_found());
    // Out-of-bounds indices.
    assert!(doc.get("c[10]").unwrap_err().is_index_out_of_bounds());
    assert!(doc.get("d[0][5]").unwrap_err().is_index_out_of_bounds());
}

#[test]
fn test_type_mismatch_names_value_and_kind() {
    let doc = doc(MIXED);
    let err = doc.get("a.b.e").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("expected object"), "got: {message}");
    assert!(message.contains("string"), "got: {message}");
    assert!(message.contains("moo"), "got: {message}");
}

#[test]
fn test_index_in_bounds_never_fails() {
    let doc = doc(MIXED);
    for i in 0..3 {
        assert!(doc.get(&format!("c[{i}]")).is_ok(), "c[{i}]");
    }
    assert!(doc.get("c[3]").unwrap_err().is_index_out_of_bounds());
}

#[test]
fn test_set_from_empty_document() {
    let doc = Document::new();
    let steps: Vec<(&str, Value)> = vec![
        ("a.b.c", json!(1)),
        ("a.b.d", json!("moo")),
        ("b", json!([1, 2, 3])),
        ("b[0]", json!(4)),
        ("c", json!({"A": 1, "B": 1.2, "C": true})),
        ("c.A", json!(false)),
        ("c.A", json!("X")),
        ("c.B", json!(4.5)),
        ("b[0]", json!([1.2, 1.3, 1.4])),
        ("b[0][0]", json!(["a", "b", "c"])),
        ("b[0][0][1]", json!("FUU")),
    ];

    for (path, value) in steps {
        doc.set(path, value.clone()).unwrap();
        assert_eq!(doc.get(path).unwrap(), value, "{path}");
    }

    assert_eq!(
        doc.to_string(),
        r#"{"a":{"b":{"c":1,"d":"moo"}},"b":[[["a","FUU","c"],1.3,1.4],2,3],"c":{"A":"X","B":4.5,"C":true}}"#
    );
}

#[test]
fn test_set_into_existing_document() {
    let doc = doc(MIXED);
    let steps: Vec<(&str, Value)> = vec![
        ("a.b", json!({"x": 0.5, "y": 10})),
        ("c[0]", json!("xxx")),
        ("b", json!([1, 2, 3, 4, 5])),
        ("d[1].a", json!("zzz")),
    ];

    for (path, value) in steps {
        doc.set(path, value.clone()).unwrap();
        assert_eq!(doc.get(path).unwrap(), value, "{path}");
    }

    assert_eq!(
        doc.to_string(),
        r#"{"a":{"b":{"x":0.5,"y":10},"c":1,"d":false},"b":[1,2,3,4,5],"c":["xxx",2,3],"d":[[0,1],{"a":"zzz"},[{"b":2},{"c":3}]],"users":[{"name":"foo"},{"name":"bash"}]}"#
    );
}

#[test]
fn test_set_overwrites_array_element_in_place() {
    let doc = Document::new();
    doc.set("b", json!([1, 2, 3])).unwrap();
    doc.set("b[0]", 4).unwrap();
    assert_eq!(doc.get("b").unwrap(), json!([4, 2, 3]));
}

#[test]
fn test_set_never_appends() {
    let doc = Document::new();
    doc.set("b", json!([1, 2, 3])).unwrap();
    assert!(doc.set("b[3]", 4).unwrap_err().is_index_out_of_bounds());
    assert_eq!(doc.get("b").unwrap(), json!([1, 2, 3]));
}

#[test]
fn test_set_get_round_trip_through_autocreation() {
    let doc = Document::new();
    doc.set("deep.er.and.deep.er.still", json!({"leaf": [null]}))
        .unwrap();
    assert_eq!(
        doc.get("deep.er.and.deep.er.still").unwrap(),
        json!({"leaf": [null]})
    );
}

#[test]
fn test_delete_field_then_get_fails_not_found() {
    let doc = doc(DEEP);
    assert_eq!(doc.get_string("a.b.c.e").unwrap(), "moo");

    doc.delete("a.b.c.e").unwrap();
    assert!(doc.get("a.b.c.e").unwrap_err().is_not_found());
}

#[test]
fn test_delete_absent_field_is_silent_success() {
    let doc = doc(MIXED);
    doc.delete("a.nope").unwrap();
    doc.delete("a.nope").unwrap();
}

#[test]
fn test_delete_nested_array_element_shrinks() {
    let doc = doc(DEEP);
    assert_eq!(doc.get_array("a.b.c.an-array").unwrap().len(), 3);

    doc.delete("a.b.c.an-array[0]").unwrap();
    let remaining = doc.get_array("a.b.c.an-array").unwrap();
    assert_eq!(remaining, vec![json!(2), json!(3)]);
}

#[test]
fn test_delete_array_element_out_of_range_fails() {
    let doc = doc(MIXED);
    assert!(doc
        .delete("c[10]")
        .unwrap_err()
        .is_index_out_of_bounds());
}

#[test]
fn test_delete_through_missing_parent_fails() {
    let doc = doc(MIXED);
    assert!(doc.delete("nope.deeper").unwrap_err().is_not_found());
}

#[test]
fn test_scalar_root_document() {
    let doc: Document = "\"hello\"".parse().unwrap();
    assert_eq!(doc.get_string(".").unwrap(), "hello");
    assert_eq!(doc.root_kind(), "string");

    let doc: Document = "1".parse().unwrap();
    assert_eq!(doc.get_float(".").unwrap(), 1.0);

    // Scalar roots reject traversal with a kind error, not a crash.
    assert!(doc.get("a").unwrap_err().is_type_mismatch());
}

#[test]
fn test_marshal_pins_sorted_key_order() {
    let doc = Document::new();
    doc.set("foo.bar", "hello").unwrap();
    doc.set("foo.nums", json!([1, 2])).unwrap();

    let bytes = doc.to_vec().unwrap();
    assert_eq!(bytes, br#"{"foo":{"bar":"hello","nums":[1,2]}}"#);

    // Insertion order does not leak into the encoding.
    let doc = Document::new();
    doc.set("z", 1).unwrap();
    doc.set("a", 2).unwrap();
    doc.set("m", 3).unwrap();
    assert_eq!(doc.to_string(), r#"{"a":2,"m":3,"z":1}"#);
}

#[test]
fn test_views_share_storage_with_parent() {
    let doc = doc(MIXED);
    let users = doc.at("users").unwrap();

    users.set("[0].name", "updated").unwrap();
    assert_eq!(doc.get_string("users[0].name").unwrap(), "updated");

    doc.set("users[1].name", "direct").unwrap();
    assert_eq!(users.get_string("[1].name").unwrap(), "direct");
}

#[test]
fn test_sibling_views_observe_each_other() {
    let doc = Document::new();
    doc.set("shared.counter", 0).unwrap();

    let left = doc.at("shared").unwrap();
    let right = doc.at("shared").unwrap();

    left.set("counter", 1).unwrap();
    assert_eq!(right.get_int("counter").unwrap(), 1);
}

#[test]
fn test_view_of_view() {
    let doc = doc(DEEP);
    let c = doc.at("a.b.c").unwrap();
    let g = c.at("g").unwrap();

    g.set("x[0]", 99).unwrap();
    assert_eq!(doc.get_int("a.b.c.g.x[0]").unwrap(), 99);
}

#[test]
fn test_document_round_trips_through_serde() {
    let original = doc(MIXED);
    let encoded = serde_json::to_vec(&original).unwrap();
    let decoded: Document = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(decoded.snapshot(), original.snapshot());
}

#[test]
fn test_errors_expose_module_and_kind() {
    let doc = Document::new();
    let err = doc.get("missing").unwrap_err();
    assert_eq!(err.module(), "document");
    assert!(err.is_not_found());
    assert!(!err.is_type_mismatch());

    let err: Error = Document::from_json("{not json").unwrap_err();
    assert_eq!(err.module(), "json");
    assert!(err.is_json_error());
}
