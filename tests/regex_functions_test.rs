// Copyright 2025 Sqlregex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Regex Function Tests
//!
//! End-to-end tests for the regex scalar functions through the
//! registration boundary, the way a host engine invokes them.

use sqlregex::{DataType, Error, Extension, Value};

fn ext() -> Extension {
    Extension::with_defaults().expect("Failed to register extension")
}

fn text(s: &str) -> Value {
    Value::text(s)
}

#[test]
fn test_regex_like_basic() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_like", &[text(r"^a+b$"), text("aaab")]).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        ext.invoke("regex_like", &[text(r"^a+b$"), text("ba")]).unwrap(),
        Value::Boolean(false)
    );
    // Inline flags are part of the pattern text
    assert_eq!(
        ext.invoke("regex_like", &[text("(?i)hello"), text("HELLO world")])
            .unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_regex_like_null_propagation() {
    let ext = ext();
    let null_pattern = ext
        .invoke("regex_like", &[Value::null_unknown(), text("x")])
        .unwrap();
    assert!(null_pattern.is_null());
    assert_eq!(null_pattern.data_type(), DataType::Boolean);

    let null_subject = ext
        .invoke("regex_like", &[text("a"), Value::null_unknown()])
        .unwrap();
    assert!(null_subject.is_null());
}

#[test]
fn test_regex_like_idempotent() {
    let ext = ext();
    let args = [text(r"\d{3}"), text("abc 123")];
    let first = ext.invoke("regex_like", &args).unwrap();
    let patterns_after_first = ext.cached_patterns();
    let second = ext.invoke("regex_like", &args).unwrap();

    assert_eq!(first, second);
    assert_eq!(ext.cached_patterns(), patterns_after_first);
    assert_eq!(ext.cache_stats().hits, 1);
}

#[test]
fn test_regexp_operator_hook() {
    let ext = ext();
    // The host rewrites `subject REGEXP pattern` into this call
    assert_eq!(
        ext.invoke("regexp", &[text(r"^\d+$"), text("42")]).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        ext.invoke("regexp", &[text(r"^\d+$"), text("4x2")]).unwrap(),
        Value::Boolean(false)
    );
    let null = ext
        .invoke("regexp", &[text("a"), Value::null_unknown()])
        .unwrap();
    assert!(null.is_null());
    assert_eq!(null.data_type(), DataType::Boolean);
}

#[test]
fn test_regex_find_whole_match() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_find", &[text(r"\d+"), text("order 1234 shipped")])
            .unwrap(),
        text("1234")
    );
    assert_eq!(
        ext.invoke("regex_find", &[text(r"\d+"), text("no digits")]).unwrap(),
        Value::null_unknown()
    );
}

#[test]
fn test_regex_find_capture_group() {
    let ext = ext();
    let args = [
        text(r"(\w+)@([\w.]+)"),
        text("contact: alice@example.com"),
        Value::integer(1),
    ];
    assert_eq!(ext.invoke("regex_find", &args).unwrap(), text("alice"));

    let whole = [
        text(r"(\w+)@([\w.]+)"),
        text("contact: alice@example.com"),
        Value::integer(0),
    ];
    assert_eq!(
        ext.invoke("regex_find", &whole).unwrap(),
        text("alice@example.com")
    );
}

#[test]
fn test_regex_find_empty_pattern_matches_empty_string() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_find", &[text(""), text("abc")]).unwrap(),
        text("")
    );
}

#[test]
fn test_regex_find_group_out_of_range() {
    let ext = ext();
    assert_eq!(
        ext.invoke(
            "regex_find",
            &[text("(a)"), text("abc"), Value::integer(5)]
        )
        .unwrap_err(),
        Error::invalid_group_index(5, 1)
    );
}

#[test]
fn test_regex_find_nonparticipating_group_is_null() {
    let ext = ext();
    assert_eq!(
        ext.invoke(
            "regex_find",
            &[text("(a)|(b)"), text("b"), Value::integer(1)]
        )
        .unwrap(),
        Value::null_unknown()
    );
}

#[test]
fn test_regex_find_at_offsets() {
    let ext = ext();
    let pattern = text(r"\d+");
    let subject = text("a1 b22 c333");
    assert_eq!(
        ext.invoke("regex_find_at", &[pattern.clone(), subject.clone(), Value::integer(0)])
            .unwrap(),
        text("1")
    );
    assert_eq!(
        ext.invoke("regex_find_at", &[pattern.clone(), subject.clone(), Value::integer(2)])
            .unwrap(),
        text("22")
    );
    assert_eq!(
        ext.invoke("regex_find_at", &[pattern.clone(), subject.clone(), Value::integer(8)])
            .unwrap(),
        text("333")
    );
    // Offset past the end of the subject matches nothing
    assert_eq!(
        ext.invoke("regex_find_at", &[pattern, subject, Value::integer(100)])
            .unwrap(),
        Value::null_unknown()
    );
}

#[test]
fn test_regex_find_at_rejects_negative_offset() {
    let ext = ext();
    let err = ext
        .invoke(
            "regex_find_at",
            &[text("a"), text("abc"), Value::integer(-3)],
        )
        .unwrap_err();
    assert!(err.is_usage_error());
}

#[test]
fn test_regex_replace_all_matches() {
    let ext = ext();
    assert_eq!(
        ext.invoke(
            "regex_replace",
            &[text(r"\d+"), text("a1 b22 c333"), text("#")]
        )
        .unwrap(),
        text("a# b# c#")
    );
}

#[test]
fn test_regex_replace_group_references() {
    let ext = ext();
    assert_eq!(
        ext.invoke(
            "regex_replace",
            &[
                text(r"(?P<key>\w+)=(?P<val>\w+)"),
                text("x=1;y=2"),
                text("${val}=${key}"),
            ]
        )
        .unwrap(),
        text("1=x;2=y")
    );
    // $$ is a literal dollar
    assert_eq!(
        ext.invoke(
            "regex_replace",
            &[text(r"(\d+)"), text("price 5"), text("$$$1")]
        )
        .unwrap(),
        text("price $5")
    );
}

#[test]
fn test_regex_replace_zero_length_matches_terminate() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_replace", &[text("a*"), text("bb"), text("-")])
            .unwrap(),
        text("-b-b-")
    );
}

#[test]
fn test_regex_replace_invalid_template() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_replace", &[text("(a)"), text("a"), text("$9")])
            .unwrap_err(),
        Error::invalid_template("9", 1)
    );
    assert_eq!(
        ext.invoke(
            "regex_replace",
            &[text("(a)"), text("a"), text("${missing}")]
        )
        .unwrap_err(),
        Error::invalid_template("missing", 1)
    );
}

#[test]
fn test_regex_count() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_count", &[text("an"), text("banana")]).unwrap(),
        Value::Integer(2)
    );
    assert_eq!(
        ext.invoke("regex_count", &[text("z"), text("banana")]).unwrap(),
        Value::Integer(0)
    );
    // Empty pattern matches the empty span at every position
    assert_eq!(
        ext.invoke("regex_count", &[text(""), text("abc")]).unwrap(),
        Value::Integer(4)
    );
}

#[test]
fn test_regex_valid() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_valid", &[text(r"\w+")]).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        ext.invoke("regex_valid", &[text("(unclosed")]).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_regex_version() {
    let ext = ext();
    let version = ext.invoke("regex_version", &[]).unwrap();
    assert!(version.as_str().unwrap().starts_with('v'));
}

#[test]
fn test_invalid_pattern_fails_identically_every_time() {
    let ext = ext();
    let args = [text("a["), text("subject")];
    let first = ext.invoke("regex_like", &args).unwrap_err();
    let second = ext.invoke("regex_like", &args).unwrap_err();
    assert_eq!(first, second);
    assert!(first.is_compile_error());
    // Failed compiles are never cached
    assert_eq!(ext.cached_patterns(), 0);
}

#[test]
fn test_argument_type_errors() {
    let ext = ext();
    assert_eq!(
        ext.invoke("regex_like", &[Value::integer(1), text("x")]).unwrap_err(),
        Error::argument_type("REGEX_LIKE", 1)
    );
    assert_eq!(
        ext.invoke(
            "regex_replace",
            &[text("a"), text("aa"), Value::null_unknown()]
        )
        .unwrap_err(),
        Error::argument_type("REGEX_REPLACE", 3)
    );
    assert_eq!(
        ext.invoke("regex_count", &[text("a"), Value::null_unknown()])
            .unwrap_err(),
        Error::argument_type("REGEX_COUNT", 2)
    );
}

#[test]
fn test_argument_count_errors() {
    let ext = ext();
    assert!(ext.invoke("regex_like", &[text("a")]).is_err());
    assert!(ext
        .invoke("regex_find", &[text("a"), text("b"), Value::integer(0), text("extra")])
        .is_err());
    assert!(ext.invoke("regex_version", &[text("a")]).is_err());
}

#[test]
fn test_fixed_names_in_catalog() {
    let ext = ext();
    for name in [
        "regexp",
        "regex_like",
        "regex_find",
        "regex_find_at",
        "regex_replace",
        "regex_count",
    ] {
        let info = ext
            .function_info(name)
            .unwrap_or_else(|| panic!("missing catalog entry for {name}"));
        assert_eq!(info.name(), name.to_uppercase());
    }
}
