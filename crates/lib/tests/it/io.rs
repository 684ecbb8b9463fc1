//! Construction from bytes, strings, readers, and files.

use std::io::Write;

use dotson::{Document, expand_tilde};
use serde_json::json;

use crate::helpers::MIXED;

#[test]
fn test_from_slice_and_from_json() {
    let doc = Document::from_slice(br#"{"a": 1}"#).unwrap();
    assert_eq!(doc.get_int("a").unwrap(), 1);

    let doc = Document::from_json(r#"{"a": 2}"#).unwrap();
    assert_eq!(doc.get_int("a").unwrap(), 2);
}

#[test]
fn test_decode_errors_are_json_errors() {
    assert!(Document::from_slice(b"{").unwrap_err().is_json_error());
    assert!(Document::from_json("[1,").unwrap_err().is_json_error());
    assert!(
        Document::from_reader(&b"nope"[..])
            .unwrap_err()
            .is_json_error()
    );
}

#[test]
fn test_from_reader() {
    let doc = Document::from_reader(MIXED.as_bytes()).unwrap();
    assert_eq!(doc.get_string("users[1].name").unwrap(), "bash");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MIXED.as_bytes()).unwrap();

    let path = file.path().to_str().unwrap();
    let doc = Document::from_file(path).unwrap();
    assert_eq!(doc.get_int("a.c").unwrap(), 1);
}

#[test]
fn test_from_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");
    let err = Document::from_file(path.to_str().unwrap()).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_expand_tilde_only_touches_prefix() {
    assert_eq!(
        expand_tilde("/tmp/x.json"),
        std::path::PathBuf::from("/tmp/x.json")
    );
    assert_eq!(
        expand_tilde("rel/x~tilde.json"),
        std::path::PathBuf::from("rel/x~tilde.json")
    );
    if let Some(home) = std::env::var_os("HOME") {
        let expanded = expand_tilde("~/x.json");
        assert!(expanded.starts_with(std::path::PathBuf::from(home)));
    }
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    let path = path.to_str().unwrap();

    let doc = Document::new();
    doc.set("nested.flag", true).unwrap();
    std::fs::write(path, doc.to_vec().unwrap()).unwrap();

    let reloaded = Document::from_file(path).unwrap();
    assert!(reloaded.get_bool("nested.flag").unwrap());
    assert_eq!(reloaded.snapshot(), json!({"nested": {"flag": true}}));
}

#[test]
fn test_pretty_encodings() {
    let doc = Document::new();
    doc.set("a", json!([1, 2])).unwrap();

    let two_space = doc.to_string_pretty().unwrap();
    assert_eq!(two_space, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");

    let tabs = String::from_utf8(doc.to_vec_pretty("\t").unwrap()).unwrap();
    assert_eq!(tabs, "{\n\t\"a\": [\n\t\t1,\n\t\t2\n\t]\n}");

    // Compact form has no whitespace at all.
    assert_eq!(doc.to_vec().unwrap(), br#"{"a":[1,2]}"#);
}
