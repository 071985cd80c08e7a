//! Command-line contract of the `mmse` and `diag_frames` binaries.

mod common;

use std::process::Command;

use mmsave::SaveWriter;

fn mmse() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mmse"))
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = mmse().output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {stdout}");
}

#[test]
fn test_too_many_arguments_prints_usage() {
    let output = mmse().args(["a", "b", "c"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}

#[test]
fn test_unpack_and_pack_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let original = SaveWriter::write(&common::career_document()).unwrap();
    common::write_file(dir.path(), "save1.sav", &original);

    let status = mmse()
        .current_dir(dir.path())
        .arg("save1.sav")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("save1_info.json").exists());
    assert!(dir.path().join("save1_data.json").exists());

    std::fs::remove_file(dir.path().join("save1.sav")).unwrap();
    let status = mmse()
        .current_dir(dir.path())
        .args(["save1_info.json", "save1_data.json"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::read(dir.path().join("save1.sav")).unwrap(), original);
}

#[test]
fn test_corrupt_save_aborts_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    common::write_file(dir.path(), "broken.sav", b"mm2s\x05\x00\x00\x00");

    let output = mmse()
        .current_dir(dir.path())
        .arg("broken.sav")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unable to unpack broken.sav"), "stderr: {stderr}");
    assert!(stderr.contains("Bad version"), "stderr: {stderr}");
}

#[test]
fn test_diag_frames_without_arguments_reports_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_diag_frames"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}
