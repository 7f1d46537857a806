#![cfg(unix)]

use std::fs;

mod common;

use common::{parse_json, stdout, FakeHost};

#[test]
fn major_only_request_skips_older_host_interpreter() {
    let host = FakeHost::new("pyfind-major");
    let old = host.interpreter("python2", "CPython", "2.7.18");
    let new = host.interpreter("python3", "CPython", "3.11.2");

    let assert = host
        .command(Some(&old))
        .args(["--json", "find", "-p", "3"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["details"]["interpreter"]["version"], "3.11.2");
    assert_eq!(
        payload["details"]["interpreter"]["executable"],
        new.display().to_string()
    );
}

#[test]
fn default_request_resolves_to_host_interpreter() {
    let host = FakeHost::new("pyfind-default");
    let current = host.interpreter("python3", "CPython", "3.12.4");

    let assert = host
        .command(Some(&current))
        .args(["--json", "find"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    assert_eq!(
        payload["details"]["spec"],
        current.display().to_string()
    );
    assert_eq!(
        payload["details"]["interpreter"]["executable"],
        current.display().to_string()
    );
}

#[test]
fn missing_interpreter_names_the_request() {
    let host = FakeHost::new("pyfind-missing");
    host.interpreter("python3", "CPython", "3.12.4");

    let assert = host
        .command(None)
        .args(["find", "--python", "3.99"])
        .assert()
        .code(1);
    let output = stdout(&assert);
    assert!(
        output.contains("no interpreter satisfies `3.99`"),
        "unexpected output: {output}"
    );
    assert!(output.contains("Hint:"), "hint missing: {output}");
}

#[test]
fn absolute_path_that_is_not_an_interpreter_is_not_selected() {
    let host = FakeHost::new("pyfind-notpython");
    let current = host.interpreter("python3", "CPython", "3.12.4");
    let notes = host.temp.path().join("notes.txt");
    fs::write(&notes, "not a python").expect("write notes");

    let assert = host
        .command(Some(&current))
        .args(["--json", "find", "-p", notes.to_str().unwrap()])
        .assert()
        .code(1);
    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
}

#[test]
fn absolute_path_beats_path_lookup() {
    let host = FakeHost::new("pyfind-abs");
    host.interpreter("python3", "CPython", "3.10.4");
    let elsewhere = FakeHost::new("pyfind-abs-other");
    let explicit = elsewhere.interpreter("python3", "CPython", "3.10.4");

    let assert = host
        .command(None)
        .args(["--json", "find", "-p", explicit.to_str().unwrap()])
        .assert()
        .success();
    let payload = parse_json(&assert);
    assert_eq!(
        payload["details"]["interpreter"]["executable"],
        explicit.display().to_string()
    );
}

#[test]
fn implementation_alias_on_path_is_checked() {
    let host = FakeHost::new("pyfind-impl");
    // `pypy3` that is really CPython: the exact-name hit is rejected, but the
    // generated `pypy3` name trusts the file name.
    let old = host.interpreter("python2", "CPython", "2.7.18");
    host.interpreter("pypy3", "CPython", "3.10.4");

    let assert = host
        .command(Some(&old))
        .args(["--json", "explain", "-p", "pypy3"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    let evaluated = payload["details"]["evaluated"]
        .as_array()
        .expect("evaluated array");
    assert_eq!(evaluated.len(), 3);
    assert_eq!(evaluated[0]["source"], "current");
    assert_eq!(evaluated[0]["rejected"]["rule"], "version");
    assert_eq!(evaluated[1]["source"], "exact-name");
    assert_eq!(evaluated[1]["rejected"]["rule"], "implementation");
    assert_eq!(evaluated[2]["source"], "generated-name");
    assert!(evaluated[2]["rejected"].is_null());
}

#[test]
fn names_lists_path_search_order() {
    let host = FakeHost::new("pyfind-names");
    let assert = host
        .command(None)
        .args(["--json", "names", "-p", "python3.11"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    let names: Vec<_> = payload["details"]["names"]
        .as_array()
        .expect("names")
        .iter()
        .map(|entry| entry["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names.first().map(String::as_str),
        Some("CPython3.11")
    );
    assert_eq!(names.last().map(String::as_str), Some("python"));
}

#[test]
fn explain_human_output_numbers_candidates() {
    let host = FakeHost::new("pyfind-explain");
    let old = host.interpreter("python2", "CPython", "2.7.18");
    host.interpreter("python3", "CPython", "3.11.2");

    let assert = host
        .command(Some(&old))
        .args(["explain", "-p", "3"])
        .assert()
        .success();
    let output = stdout(&assert);
    assert!(output.contains(" 1. [current]"), "{output}");
    assert!(output.contains("rejected: version 2.7.18"), "{output}");
    assert!(output.contains(" 2. [generated name]"), "{output}");
    assert!(output.contains("(selected)"), "{output}");
}
