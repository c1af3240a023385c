use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn spotless_applier() -> Command {
    Command::cargo_bin("spotless-applier").unwrap()
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_dry_run_gradle_project_with_new_wrapper() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("settings.gradle"), "rootProject.name = 'demo'");
    write(
        &root.join("gradle/wrapper/gradle-wrapper.properties"),
        "distributionUrl=https\\://services.gradle.org/distributions/gradle-8.5-bin.zip\n",
    );

    spotless_applier()
        .args(["apply", "--dry-run", "--non-interactive", "-p"])
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "gradle spotlessApply --no-configuration-cache",
        ));
}

#[test]
fn test_dry_run_maven_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().canonicalize().unwrap();
    write(&root.join("pom.xml"), "<project/>");
    let file = root.join("src/main/java/Foo.java");
    write(&file, "class Foo {}");

    spotless_applier()
        .args(["apply", "--dry-run", "-p"])
        .arg(&root)
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("mvn spotless:apply -DspotlessFiles="))
        .stdout(predicate::str::contains(r".src.main.java.Foo\.java"));
}

#[test]
fn test_dry_run_without_build_tool_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("notes.txt");
    write(&file, "hello");

    spotless_applier()
        .args(["apply", "--dry-run", "-p"])
        .arg(temp_dir.path())
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to resolve build tool"));
}

#[test]
fn test_modules_json() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("pom.xml"), "<project/>");
    write(&root.join("core/pom.xml"), "<project/>");
    write(&root.join("web/pom.xml"), "<project/>");

    let output = spotless_applier()
        .args(["modules", "--json", "-p"])
        .arg(root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 3);
    assert_eq!(modules[0]["is_root_module"], true);
    assert_eq!(modules[1]["name"], "core");
    assert_eq!(modules[2]["kind"], "maven");
}

#[test]
fn test_modules_empty_project() {
    let temp_dir = TempDir::new().unwrap();

    spotless_applier()
        .args(["modules", "-p"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No Gradle or Maven modules found"));
}

#[test]
fn test_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();

    spotless_applier()
        .args(["init", "-p"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(temp_dir.path().join(".spotless-applier.json").is_file());

    spotless_applier()
        .args(["init", "-p"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists"));
}
