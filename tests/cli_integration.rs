//! CLI 集成测试
//!
//! 通过真实二进制验证参数解析（含旧式 `/flag` 写法）与控制台输出

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// 获取 msbuild-editor 二进制的命令实例
fn editor_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("msbuild-editor"))
}

const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <LangVersion>7.3</LangVersion>
  </PropertyGroup>
</Project>
"#;

fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("App")).unwrap();
    fs::write(dir.path().join("App/App.csproj"), PROJECT).unwrap();
    dir
}

#[test]
fn test_missing_rootdir_prints_usage() {
    editor_cmd()
        .args(["/langversion", "8.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: msbuild-editor /rootdir"));
}

#[test]
fn test_rootdir_without_value_prints_usage() {
    editor_cmd()
        .args(["/rootdir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_legacy_arguments_update_project() {
    let dir = setup_project();

    editor_cmd()
        .arg("/RootDir")
        .arg(dir.path())
        .args(["/langversion", "8.0", "/unknown", "/save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 project(s)"))
        .stdout(predicate::str::contains("Number of changes for project file App.csproj: 1"))
        .stdout(predicate::str::contains("Total changes: 1"))
        .stdout(predicate::str::contains("All changes were saved!"));

    let content = fs::read_to_string(dir.path().join("App/App.csproj")).unwrap();
    assert!(content.contains("<LangVersion>8.0</LangVersion>"));
}

#[test]
fn test_save_flag_does_not_gate_writes() {
    let dir = setup_project();

    editor_cmd()
        .arg("/rootdir")
        .arg(dir.path())
        .args(["/langversion", "9.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total changes: 1"))
        .stdout(predicate::str::contains("All changes were saved!").not());

    let content = fs::read_to_string(dir.path().join("App/App.csproj")).unwrap();
    assert!(content.contains("<LangVersion>9.0</LangVersion>"));
}

#[test]
fn test_strict_save_without_save_leaves_file() {
    let dir = setup_project();

    editor_cmd()
        .arg("--rootdir")
        .arg(dir.path())
        .args(["--langversion", "9.0", "--strict-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not saved)"));

    assert_eq!(fs::read_to_string(dir.path().join("App/App.csproj")).unwrap(), PROJECT);
}

#[test]
fn test_missing_langversion_reports_count_only() {
    let dir = setup_project();

    editor_cmd()
        .arg("/rootdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 project(s)"))
        .stdout(predicate::str::contains("No changes for project file App.csproj"))
        .stdout(predicate::str::contains("Total changes: 0"));

    assert_eq!(fs::read_to_string(dir.path().join("App/App.csproj")).unwrap(), PROJECT);
}

#[test]
fn test_broken_project_fails_after_batch() {
    let dir = setup_project();
    fs::write(dir.path().join("Broken.csproj"), "<Project>").unwrap();

    editor_cmd()
        .arg("/rootdir")
        .arg(dir.path())
        .args(["/langversion", "8.0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total changes: 1"))
        .stdout(predicate::str::contains("Failed project files: 1"));
}

#[test]
fn test_missing_root_directory_fails() {
    let dir = TempDir::new().unwrap();

    editor_cmd()
        .arg("/rootdir")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root directory not found"));
}

#[test]
fn test_json_summary() {
    let dir = setup_project();

    let output = editor_cmd()
        .arg("--rootdir")
        .arg(dir.path())
        .args(["--langversion", "8.0", "--json", "--jobs", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["total_changes"], 1);
    assert_eq!(summary["files_found"], 1);
    assert_eq!(summary["files"][0]["outcome"]["kind"], "updated");
}
