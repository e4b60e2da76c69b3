//! CLI end-to-end tests
//!
//! Tests for the renderforge command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use renderforge_compiler::template::format_timestamp_local;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const CREATED: &str = "2023-03-24T10:05:00Z";

/// Get a command for the renderforge binary, run from `dir` so no stray
/// `./renderforge.toml` is picked up.
#[allow(deprecated)]
fn renderforge_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("renderforge").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_job(dir: &TempDir, format: &str, blendfile: &str) -> PathBuf {
    let path = dir.path().join("job.toml");
    fs::write(
        &path,
        format!(
            r#"
name = "Shot A"

[settings]
frames = "1-5"
chunk_size = 2
render_output_root = "/render"
blendfile = '{blendfile}'
jobname = "scene"
format = "{format}"
image_file_extension = ".tga"
"#
        ),
    )
    .unwrap();
    path
}

fn expected_timestamp() -> String {
    let created = chrono::DateTime::parse_from_rfc3339(CREATED)
        .unwrap()
        .with_timezone(&chrono::Utc);
    format_timestamp_local(created)
}

#[test]
fn test_cli_no_args_shows_help() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("renderforge "));
}

#[test]
fn test_cli_compile_help() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["compile", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile a job file"));
}

#[test]
fn test_cli_compile_targa_job() {
    let temp = tempdir().unwrap();
    let job = write_job(&temp, "TARGA", r"C:\jobs\shotA\scene.blend");

    let output = renderforge_cmd(temp.path())
        .args(["compile", "--created", CREATED])
        .arg(&job)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let job = &value["job"];
    assert_eq!(job["name"], "Shot A");
    assert_eq!(job["status"], "emitted");
    assert_eq!(
        job["settings"]["render_output_path"],
        format!("/render/scene/{}/######", expected_timestamp())
    );

    let tasks = job["tasks"].as_array().unwrap();
    let ids: Vec<&str> = tasks.iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["render-1-2", "render-3-4", "render-5"]);

    for task in tasks {
        assert_eq!(task["worker_type"], "blender");
        let command = &task["command"];
        assert_eq!(command["name"], "blender-render");
        assert!(command["blendfile"]
            .as_str()
            .unwrap()
            .ends_with("shotA/scene.blend"));
        let args: Vec<&str> = command["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();
        let idx = args.iter().position(|a| *a == "--render-format").unwrap();
        assert_eq!(args[idx + 1], "TGA");
    }
}

#[test]
fn test_cli_compile_to_file_with_config() {
    let temp = tempdir().unwrap();
    let job = write_job(&temp, "PNG", "/jobs/shotA/scene.blend");
    let config = temp.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[compiler]
worker_type = "blender-gpu"

[output]
pretty = true
"#,
    )
    .unwrap();
    let out = temp.path().join("compiled.json");

    renderforge_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("compile")
        .arg(&job)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.lines().count() > 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["job"]["tasks"][0]["worker_type"], "blender-gpu");
}

#[test]
fn test_cli_compile_rejects_video_format() {
    let temp = tempdir().unwrap();
    let job = write_job(&temp, "FFMPEG", "/jobs/shotA/scene.blend");

    renderforge_cmd(temp.path())
        .arg("compile")
        .arg(&job)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported_format"))
        .stderr(predicate::str::contains("only renders images"));
}

#[test]
fn test_cli_compile_nonexistent_file() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["compile", "/nonexistent/job.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read job file"));
}

#[test]
fn test_cli_frames_preview() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["frames", "3, 5-10, 47-52", "--chunk-size", "4"])
        .assert()
        .success()
        .stdout("3\t3\n5-8\t5..8\n9-10\t9..10\n47-50\t47..50\n51-52\t51..52\n");
}

#[test]
fn test_cli_frames_bad_expression() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["frames", "1-3,x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1-3,x"));
}

#[test]
fn test_cli_frames_too_many_chunks() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["frames", "0-4294967295", "--chunk-size", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("limit of 1000000"));
}

#[test]
fn test_cli_frames_bad_chunk_size() {
    let temp = tempdir().unwrap();
    renderforge_cmd(temp.path())
        .args(["frames", "1-10", "--chunk-size", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_validate_job() {
    let temp = tempdir().unwrap();
    let job = write_job(&temp, "OPEN_EXR", "/jobs/shotA/scene.blend");

    renderforge_cmd(temp.path())
        .arg("validate")
        .arg(&job)
        .assert()
        .success()
        .stdout(predicate::str::contains("Job file is valid"))
        .stdout(predicate::str::contains("Chunks: 3 of at most 2"))
        .stdout(predicate::str::contains(
            "Worker placeholders: blender, blenderArgs, clientStoragePath, jobSubPath, renderSubPath, deviceType",
        ))
        .stdout(predicate::str::contains("Warning"));
}

#[test]
fn test_cli_validate_rejects_video_format() {
    let temp = tempdir().unwrap();
    let job = write_job(&temp, "AVI_RAW", "/jobs/shotA/scene.blend");

    renderforge_cmd(temp.path())
        .arg("validate")
        .arg(&job)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Job file is valid").not())
        .stderr(predicate::str::contains("unsupported_format"));
}

#[test]
fn test_cli_validate_missing_setting() {
    let temp = tempdir().unwrap();
    let job = temp.path().join("job.toml");
    fs::write(&job, "name = \"broken\"\n\n[settings]\nframes = \"1-5\"\n").unwrap();

    renderforge_cmd(temp.path())
        .arg("validate")
        .arg(&job)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse job file"));
}
