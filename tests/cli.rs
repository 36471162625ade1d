//! End-to-end runs of the generate-tests binary against a scratch directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const CONFIG: &str = r#"
jobs:
  ci-kubernetes-e2e-gce-cos-ver1.29-default:
    interval: 2h
    releaseBlocking: true
    args: ["--foo=3"]
  ci-kubernetes-e2enode-cos-ver1.29-serial:
    cron: "0 */6 * * *"
cloudProviders:
  gce: { args: ["--provider=gce"] }
images:
  cos: { args: ["--image-family=cos"], testgrid_prefix: google }
k8sVersions:
  "1.29": { version: "1.29", args: ["--extract=ci/latest-1.29"] }
testSuites:
  default: { args: ["--foo=1", "--timeout=120m"] }
  serial: { args: ["--node-args=--a", "--node-args=--b"] }
"#;

struct Run {
    dir: TempDir,
    output: Output,
}

impl Run {
    fn periodics_path(&self) -> PathBuf {
        self.dir.path().join("out").join("generated.yaml")
    }

    fn testgrid_path(&self) -> PathBuf {
        self.dir.path().join("testgrid").join("generated.yaml")
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

fn generate(config: &str, extra: &[&str]) -> Run {
    let dir = TempDir::new().expect("create temp dir");
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, config).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_generate-tests"))
        .arg("--yaml-config-path")
        .arg(&config_path)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .arg("--testgrid-output-path")
        .arg(dir.path().join("testgrid").join("generated.yaml"))
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("run generate-tests");

    Run { dir, output }
}

#[test]
fn writes_periodics_and_test_groups() {
    let run = generate(CONFIG, &[]);
    assert!(run.output.status.success(), "stderr: {}", run.stderr());

    let periodics = fs::read_to_string(run.periodics_path()).expect("periodics written");
    assert!(periodics.starts_with("# AUTO-GENERATED"));
    let doc: serde_yaml::Value = serde_yaml::from_str(&periodics).expect("valid yaml");
    let jobs = doc["periodics"].as_sequence().expect("periodics list");
    assert_eq!(jobs.len(), 2);
    assert_eq!(
        jobs[0]["name"].as_str(),
        Some("ci-kubernetes-e2e-gce-cos-ver1.29-default")
    );
    assert_eq!(jobs[0]["decoration_config"]["timeout"].as_str(), Some("140m"));
    assert_eq!(
        jobs[1]["spec"]["containers"][0]["args"]
            .as_sequence()
            .and_then(|args| args.last())
            .and_then(|a| a.as_str()),
        Some("--node-args=--a --b")
    );

    let groups = fs::read_to_string(run.testgrid_path()).expect("test groups written");
    let doc: serde_yaml::Value = serde_yaml::from_str(&groups).expect("valid yaml");
    let groups = doc["test_groups"].as_sequence().expect("test group list");
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0]["name"].as_str(),
        Some("ci-kubernetes-e2e-gce-cos-ver1.29-default")
    );

    assert!(run.stderr().contains("generated job"));
}

#[test]
fn custom_template_is_used() {
    let template_dir = TempDir::new().expect("create temp dir");
    let template = template_dir.path().join("custom.tmpl");
    fs::write(&template, "# custom header\n__PERIODICS__").expect("write template");

    let run = generate(CONFIG, &["--template", template.to_str().expect("utf-8 path")]);
    assert!(run.output.status.success(), "stderr: {}", run.stderr());
    let periodics = fs::read_to_string(run.periodics_path()).expect("periodics written");
    assert!(periodics.starts_with("# custom header\nperiodics:"));
}

#[test]
fn template_without_placeholder_aborts_without_output() {
    let template_dir = TempDir::new().expect("create temp dir");
    let template = template_dir.path().join("broken.tmpl");
    fs::write(&template, "periodics: []\n").expect("write template");

    let run = generate(CONFIG, &["--template", template.to_str().expect("utf-8 path")]);
    assert!(!run.output.status.success());
    assert!(run.stderr().contains("__PERIODICS__"), "stderr: {}", run.stderr());
    assert!(!run.periodics_path().exists());
}

#[test]
fn malformed_job_name_aborts_without_output() {
    let config = CONFIG.replace(
        "  ci-kubernetes-e2enode-cos-ver1.29-serial:",
        "  ci-kubernetes-e2enode-cos-serial:",
    );
    let run = generate(&config, &[]);

    assert!(!run.output.status.success());
    assert!(run.stderr().contains("expected 6 fields"), "stderr: {}", run.stderr());
    assert!(!run.periodics_path().exists());
    assert!(!run.testgrid_path().exists());
}

#[test]
fn strict_axes_rejects_unknown_keys() {
    let config = CONFIG.replace("cloudProviders:\n  gce: { args: [\"--provider=gce\"] }\n", "");

    let lenient = generate(&config, &[]);
    assert!(lenient.output.status.success(), "stderr: {}", lenient.stderr());
    assert!(lenient.stderr().contains("axis key not defined"));

    let strict = generate(&config, &["--strict-axes"]);
    assert!(!strict.output.status.success());
    assert!(strict.stderr().contains("cloudProviders key \"gce\" is not defined"));
}
