use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const API_GO: &str = r#"package events

const (
	// SessionStartEvent is emitted when a user starts an interactive session.
	SessionStartEvent = "session.start"
)
"#;

const EMIT_GO: &str = r#"package events

func emitSessionStart() {
	emit(apievents.SessionStart{
		Metadata: apievents.Metadata{
			Type: events.SessionStartEvent,
		},
	})
}
"#;

#[test]
fn test_scan_extracts_documented_event() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api.go", API_GO)?;
    test.write_file("emit.go", EMIT_GO)?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    `session.start`  `session.start` is emitted when a user starts an interactive session.

    ----- stderr -----
    ✓ Extracted 1 event type from 2 source files
    "#);

    Ok(())
}

#[test]
fn test_scan_json_format() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api.go", API_GO)?;
    test.write_file("emit.go", EMIT_GO)?;

    assert_cmd_snapshot!(test.scan_command().arg("--format").arg("json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "name": "`session.start`",
        "comment": "`session.start` is emitted when a user starts an interactive session."
      }
    ]

    ----- stderr -----
    ✓ Extracted 1 event type from 2 source files
    "#);

    Ok(())
}

#[test]
fn test_scan_tree_without_pattern_is_empty() -> Result<()> {
    let test = CliTest::with_file(
        "noop.go",
        "package noop\n\nfunc add(a, b int) int { return a + b }\n",
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ✓ Extracted 0 event types from 1 source file
    "#);

    Ok(())
}

#[test]
fn test_scan_reports_malformed_declaration() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "decls.go",
        r#"package events

const (
	// GoodEvent is emitted on good things.
	GoodEvent = "good.event"
	// BrokenEvent is computed at init time.
	BrokenEvent = eventName()
)
"#,
    )?;
    test.write_file(
        "emit.go",
        r#"package events

func emitBoth() {
	emit(E{Metadata: Metadata{Type: events.GoodEvent}})
	emit(E{Metadata: Metadata{Type: events.BrokenEvent}})
}
"#,
    )?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("`good.event`"), "stdout: {stdout}");
    assert!(!stdout.contains("BrokenEvent"), "stdout: {stdout}");
    assert!(stderr.contains("malformed-declaration"), "stderr: {stderr}");
    assert!(stderr.contains("BrokenEvent"), "stderr: {stderr}");
    assert!(stderr.contains("decls.go"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_scan_parse_error_aborts_run() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api.go", API_GO)?;
    test.write_file("emit.go", EMIT_GO)?;
    test.write_file("zz_broken.go", "package broken\n\nconst = = =\n")?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    // No partial results: the good files' records are withheld too.
    assert!(stdout.is_empty(), "stdout: {stdout}");
    assert!(stderr.contains("parse-error"), "stderr: {stderr}");
    assert!(stderr.contains("zz_broken.go"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_scan_emits_records_in_traversal_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "aa.go",
        r#"package a

// SessionStartEvent is the first declaration.
const SessionStartEvent = "session.a"
"#,
    )?;
    test.write_file(
        "zz.go",
        r#"package z

// SessionStartEvent is the second declaration.
const SessionStartEvent = "session.z"
"#,
    )?;
    test.write_file(
        "mm.go",
        r#"package m

func emit() {
	_ = E{Metadata: Metadata{Type: events.SessionStartEvent}}
}
"#,
    )?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    assert!(lines[0].contains("`session.a`"), "stdout: {stdout}");
    assert!(lines[1].contains("`session.z`"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_scan_ignores_vendor_by_default() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "vendor/dep.go",
        "package dep\n\nconst SessionStartEvent = \"session.start\"\n",
    )?;
    test.write_file(
        "emit.go",
        r#"package events

func emit() {
	_ = E{Metadata: Metadata{Type: events.SessionStartEvent}}
}
"#,
    )?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    // The candidate is discovered but its only declaration lives under
    // vendor/, which is never scanned: silent drop.
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.is_empty(), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_scan_ignores_test_files_by_default() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "api_test.go",
        r#"package events

const FakeEvent = "fake.event"

func TestEmit(t *testing.T) {
	_ = E{Metadata: Metadata{Type: events.FakeEvent}}
}
"#,
    )?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.is_empty(), "stdout: {stdout}");
    assert!(stderr.contains("0 source files"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_scan_source_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "srv/api.go",
        r#"package srv

const (
	// ExecEvent is emitted when a command is executed.
	ExecEvent = "exec"
)

func emitExec() {
	emit(Event{
		Metadata: Metadata{
			Type: events.ExecEvent,
		},
	})
}
"#,
    )?;

    let output = test
        .scan_command()
        .arg("--source-root")
        .arg("srv")
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("`exec`"), "stdout: {stdout}");
    assert!(
        stdout.contains("`exec` is emitted when a command is executed."),
        "stdout: {stdout}"
    );

    Ok(())
}

#[test]
fn test_scan_honors_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".eventrefrc.json", r#"{ "ignores": ["generated"] }"#)?;
    test.write_file(
        "api.go",
        r#"package events

// ResizeEvent is emitted on terminal resize.
const ResizeEvent = "resize"
"#,
    )?;
    test.write_file(
        "generated/gen.go",
        "package gen\n\nconst ResizeEvent = \"resize.generated\"\n",
    )?;
    test.write_file(
        "emit.go",
        r#"package events

func emit() {
	_ = E{Metadata: Metadata{Type: events.ResizeEvent}}
}
"#,
    )?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("`resize`"), "stdout: {stdout}");
    assert!(!stdout.contains("resize.generated"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_scan_runs_are_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("api.go", API_GO)?;
    test.write_file("emit.go", EMIT_GO)?;

    let first = test.scan_command().output()?;
    let second = test.scan_command().output()?;

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}
