//! Integration tests for the wide-layout binary.
//!
//! These tests run the compiled binary on the sample inputs under `demos/`
//! and on inline graphs fed through stdin.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wide-layout"))
}

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// Run the binary with `input` on stdin.
fn run(input: &str, args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            if let Some(ref mut stdin) = child.stdin {
                stdin.write_all(input.as_bytes()).ok();
            }
            child.wait_with_output()
        })
        .expect("Failed to run binary")
}

fn run_ok(input: &str, args: &[&str]) -> String {
    let output = run(input, args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-UTF8 output")
}

fn demo(name: &str) -> String {
    demos_dir().join(name).to_string_lossy().into_owned()
}

// ─── Demos ───────────────────────────────────────────────────────────────────

#[test]
fn test_all_demos_lay_out() {
    let mut inputs: Vec<PathBuf> = fs::read_dir(demos_dir())
        .expect("demos directory")
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            name.ends_with(".cfg") || (name.ends_with(".json") && name != "config.json")
        })
        .collect();
    inputs.sort();
    assert!(!inputs.is_empty(), "No demo inputs found in {:?}", demos_dir());

    for path in &inputs {
        let src = fs::read_to_string(path).unwrap();
        let blocks = wide_layout::parser::parse(&src).unwrap().block_count();

        let out = run_ok("", &[path.to_str().unwrap()]);
        let report: serde_json::Value = serde_json::from_str(&out)
            .unwrap_or_else(|e| panic!("{path:?}: output is not JSON: {e}"));
        assert_eq!(report["blocks"].as_array().unwrap().len(), blocks, "{path:?}");
    }
}

#[test]
fn test_diamond_demo_positions() {
    let out = run_ok("", &[&demo("diamond.cfg")]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows: Vec<(u64, u64, u64)> = report["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| {
            (
                b["addr"].as_u64().unwrap(),
                b["row"].as_u64().unwrap(),
                b["col"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            (0x401000, 0, 0),
            (0x401010, 1, 0),
            (0x401020, 1, 1),
            (0x401030, 2, 0),
        ]
    );
}

#[test]
fn test_svg_format() {
    let out = run_ok("", &["-f", "svg", &demo("loop.cfg")]);
    assert!(out.starts_with("<svg"));
    assert!(out.contains("stroke-opacity=\"0.2\""));
    assert!(out.contains(">loop head</text>"));
}

#[test]
fn test_config_file() {
    let out = run_ok("", &["-c", &demo("config.json"), &demo("switch.json")]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["blocks"].as_array().unwrap().len(), 6);
}

// ─── Flags ───────────────────────────────────────────────────────────────────

#[test]
fn test_reads_stdin() {
    let out = run_ok("0x1 -> 0x2\n", &[]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["edges"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unreachable_fails_without_flag() {
    let src = "0x1 -> 0x2\n0x5 -> 0x6\n";
    let output = run(src, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: 2 vertices are unreachable"), "{stderr}");

    let out = run_ok(src, &["--exclude-unreachable"]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["unreachable"], serde_json::json!([5, 6]));
}

#[test]
fn test_parse_error_reports_line() {
    let output = run("0x1 -> 0x2\nnonsense\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: line 2:"), "{stderr}");
}

#[test]
fn test_bad_config_fails() {
    let dir = std::env::temp_dir().join("wide_layout_test_config");
    fs::create_dir_all(&dir).ok();
    let config = dir.join("bad.json");
    fs::write(&config, r#"{"lane_step": 0}"#).unwrap();

    let output = run("0x1 -> 0x2\n", &["--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lane_step"), "{stderr}");

    fs::remove_file(&config).ok();
    fs::remove_dir(&dir).ok();
}

#[test]
fn test_output_to_file() {
    let dir = std::env::temp_dir().join("wide_layout_test_write");
    fs::create_dir_all(&dir).ok();
    let out_file = dir.join("out.svg");

    let out = run_ok(
        "0x1 -> 0x2\n",
        &["--format", "svg", "--output", out_file.to_str().unwrap()],
    );
    assert!(out.is_empty());
    let content = fs::read_to_string(&out_file).unwrap();
    assert!(content.starts_with("<svg"));

    fs::remove_file(&out_file).ok();
    fs::remove_dir(&dir).ok();
}

#[test]
fn test_version_flag() {
    let out = run_ok("", &["--version"]);
    assert!(out.starts_with("wide-layout "));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let output = run("0x1 -> 0x2\n", &["-v"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    serde_json::from_str::<serde_json::Value>(&stdout).expect("stdout stays pure JSON");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rows assigned"), "{stderr}");
}
