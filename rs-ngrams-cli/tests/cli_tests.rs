use std::fs;
use std::process::{Command, Output};
use std::str;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rs-ngrams"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute rs-ngrams")
}

fn stdout(output: &Output) -> &str {
    str::from_utf8(&output.stdout).expect("stdout is not valid UTF-8")
}

fn stderr(output: &Output) -> &str {
    str::from_utf8(&output.stderr).expect("stderr is not valid UTF-8")
}

#[test]
fn test_default_prints_hello_ngrams() {
    let output = run_cli(&[]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    assert_eq!(
        stdout(&output),
        "[\"hello\", \"hell\", \"hel\", \"he\", \"ello\", \"ell\", \"el\", \"llo\", \"ll\", \"lo\"]\n"
    );
}

#[test]
fn test_generate_json() {
    let output = run_cli(&["generate", "abcd", "--json", "--count"]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);

    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("invalid JSON");
    assert_eq!(value["input"], "abcd");
    assert_eq!(value["ngrams"], serde_json::json!(["abcd", "abc", "ab", "bcd", "bc", "cd"]));
    assert_eq!(value["node_bound"], 16);
}

#[test]
fn test_generate_flags() {
    let output = run_cli(&["generate", "hello", "--q", "7", "--distinct", "--json"]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["ngrams"].as_array().unwrap().len(), 10);
    assert!(value.get("node_bound").is_none());

    let output = run_cli(&["generate", "hello", "-q", "-4"]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    assert_eq!(stdout(&output), "[\"hello\", \"hell\", \"hel\", \"he\"]\n");
}

#[test]
fn test_generate_from_file_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    fs::write(&words, "ab\nabc\n").unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"level": 5, "q": 1}"#).unwrap();

    let output = run_cli(&[
        "generate",
        "--file",
        words.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--level",
        "0",
    ]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    assert_eq!(stdout(&output), "[\"ab\"]\n[\"abc\", \"ab\", \"bc\"]\n");

    // the config alone prunes every right branch
    let output = run_cli(&["generate", "abc", "--config", config.to_str().unwrap()]);
    assert_eq!(stdout(&output), "[\"abc\", \"ab\"]\n");
}

#[test]
fn test_invalid_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("binary.txt");
    fs::write(&binary, [0x68u8, 0xff, 0xfe]).unwrap();

    let output = run_cli(&["generate", "--file", binary.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("UTF-8"), "stderr: {}", stderr(&output));

    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"depth": 1}"#).unwrap();
    let output = run_cli(&["generate", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid configuration"), "stderr: {}", stderr(&output));
}

#[test]
fn test_trace_logging() {
    let output = run_cli(&["-vvv", "generate", "abc"]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    assert!(stderr(&output).contains("right node: bc q: 1, q+1: 2, lvl: 0"), "stderr: {}", stderr(&output));

    let quiet = run_cli(&["generate", "abc"]);
    assert!(!stderr(&quiet).contains("right node"));
}

#[test]
fn test_softmax_check() {
    let output = run_cli(&["softmax", "--size", "16", "--loops", "2", "--seed", "7"]);
    assert!(output.status.success(), "CLI exited with error: {:?}", output);
    let out = stdout(&output);
    assert!(out.contains("W_prime =>"));
    assert!(out.contains("our_softmax:"));
    assert!(out.contains("max abs diff:"));

    let output = run_cli(&["softmax", "--loops", "0"]);
    assert!(!output.status.success());
}
