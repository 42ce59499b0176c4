use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const COUNTER: &str = r#"{
    "name": "counter",
    "pageInfo": {
        "fields": [{ "name": "count", "kind": "number", "initialValue": "0" }],
        "methods": [{ "name": "increment", "body": "this.count.value++" }]
    },
    "componentTree": {
        "componentName": "Column",
        "children": [
            { "componentName": "Text", "props": { "text": "page.count.value" } },
            {
                "componentName": "Button",
                "events": [
                    { "type": "onClick", "actions": [{ "type": "actionName", "actionName": "increment" }] }
                ]
            }
        ]
    }
}"#;

fn pagegen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagegen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("pagegen should execute")
}

#[test]
fn no_arguments_uses_default_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages/counter.json"), COUNTER).unwrap();

    let output = pagegen(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let view = fs::read_to_string(dir.path().join("generated/CounterView.kt")).unwrap();
    assert!(view.contains("Text(text = viewModel.count.value)"));
    assert!(view.contains("viewModel.increment()"));
    assert!(dir.path().join("generated/CounterStateHolder.kt").exists());
}

#[test]
fn manifest_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("screens")).unwrap();
    fs::write(dir.path().join("screens/counter.json"), COUNTER).unwrap();
    fs::write(
        dir.path().join("pagegen.json"),
        r#"{ "name": "demo", "pages": ["screens"], "outputDir": "out", "package": "com.example.demo" }"#,
    )
    .unwrap();

    let output = pagegen(dir.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let holder = fs::read_to_string(dir.path().join("out/CounterStateHolder.kt")).unwrap();
    assert!(holder.contains("package com.example.demo\n"));
}

#[test]
fn failing_page_exits_non_zero_without_blocking_others() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages/counter.json"), COUNTER).unwrap();
    fs::write(
        dir.path().join("pages/broken.json"),
        COUNTER
            .replace("\"counter\"", "\"broken\"")
            .replace("onClick", "onLongClick"),
    )
    .unwrap();

    let output = pagegen(dir.path(), &["generate", "--output", "gen"]);
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("onLongClick"), "{stderr}");

    assert!(dir.path().join("gen/CounterView.kt").exists());
    assert!(!dir.path().join("gen/BrokenView.kt").exists());
    let written = fs::read_dir(dir.path().join("gen")).unwrap().count();
    assert_eq!(written, 2);
}

#[test]
fn unreadable_page_file_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages/a_counter.json"), COUNTER).unwrap();
    fs::write(dir.path().join("pages/b_bad.json"), r#"{ "componentTree": {} }"#).unwrap();

    let output = pagegen(dir.path(), &["generate"]);
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("b_bad.json"), "{stderr}");
    assert!(stderr.contains("1 of 2 pages failed"), "{stderr}");
    assert!(dir.path().join("generated/CounterStateHolder.kt").exists());
    assert!(dir.path().join("generated/CounterView.kt").exists());
}

#[test]
fn pages_with_colliding_names_fail() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("pages/a.json"), COUNTER).unwrap();
    fs::write(
        dir.path().join("pages/b.json"),
        COUNTER.replace("\"counter\"", "\"Counter\""),
    )
    .unwrap();

    let output = pagegen(dir.path(), &["check"]);
    assert_ne!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Checked counter"), "{stdout}");
    assert!(stderr.contains("page Counter"), "{stderr}");
}

#[test]
fn check_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("counter.json"), COUNTER).unwrap();

    let output = pagegen(dir.path(), &["check", "--pages", "counter.json"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Checked counter"));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn strict_flag_rejects_unknown_action_target() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("counter.json"),
        COUNTER.replace("\"actionName\": \"increment\"", "\"actionName\": \"incremnt\""),
    )
    .unwrap();

    let lenient = pagegen(dir.path(), &["check", "--pages", "counter.json"]);
    assert_eq!(lenient.status.code(), Some(0), "{lenient:?}");

    let strict = pagegen(dir.path(), &["check", "--pages", "counter.json", "--strict"]);
    assert_ne!(strict.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&strict.stderr).contains("incremnt"));
}

#[test]
fn print_ir_outlines_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("counter.json"), COUNTER).unwrap();

    let output = pagegen(dir.path(), &["print-ir", "counter.json"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("page counter {"), "{stdout}");
    assert!(stdout.contains("on onClick -> actionName(increment)"));
}
