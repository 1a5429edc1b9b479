//! End-to-end tests running the yamlshade binary

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use yamlshade::exitcode;

const POD: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: test # the name
spec:
  containers:
  - name: c1
    image: nginx
";

/// Run the binary inside `dir`, isolated from user configuration.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yamlshade"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("YAMLSHADE_COLOR")
        .env_remove("YAMLSHADE_INDENT")
        .output()
        .expect("run yamlshade")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn given_pod_when_color_never_then_prints_plain_yaml() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("pod.yaml"), POD).unwrap();

    // Act
    let output = run(temp.path(), &["--color", "never", "pod.yaml"]);

    // Assert
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\
apiVersion: v1
kind: Pod
metadata:
  name: test # the name
spec:
  containers:
    - name: c1
      image: nginx
"
    );
}

#[test]
fn given_pod_when_color_always_then_emits_ansi_escapes() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("pod.yaml"), POD).unwrap();

    let output = run(temp.path(), &["--color", "always", "pod.yaml"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("\x1b["));
}

#[test]
fn given_markers_flag_when_running_then_prints_textual_markers() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("pod.yaml"), POD).unwrap();

    let output = run(temp.path(), &["--markers", "pod.yaml"]);

    let out = stdout(&output);
    assert!(out.contains("CATEGORY_emphasis-high_apiVersion: v1"));
    assert!(out.contains("CATEGORY_emphasis-low_containers:"));
    assert!(out.contains("#COMMENT_ the name"));
}

#[test]
fn given_empty_document_when_running_then_fails_before_output() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("empty.yaml"), "# only a comment\n").unwrap();

    // Act
    let output = run(temp.path(), &["empty.yaml"]);

    // Assert
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no yaml document found"));
}

#[test]
fn given_missing_file_when_running_then_exits_noinput() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &["missing.yaml"]);

    assert_eq!(output.status.code(), Some(exitcode::NOINPUT));
    assert!(output.stdout.is_empty());
}

#[test]
fn given_malformed_yaml_when_running_then_exits_dataerr() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("bad.yaml"), "a: [1, 2\n").unwrap();

    let output = run(temp.path(), &["bad.yaml"]);

    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
}

#[test]
fn given_local_config_with_bad_indent_when_running_then_exits_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("pod.yaml"), POD).unwrap();
    std::fs::write(temp.path().join(".yamlshade.toml"), "indent = 0\n").unwrap();

    let output = run(temp.path(), &["pod.yaml"]);

    assert_eq!(output.status.code(), Some(exitcode::CONFIG));
}

#[test]
fn given_no_arguments_when_running_then_exits_usage() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(exitcode::USAGE));
}

#[test]
fn given_show_config_when_running_then_prints_effective_toml() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(".yamlshade.toml"), "indent = 3\n").unwrap();

    let output = run(temp.path(), &["--show-config"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("indent = 3"));
    assert!(out.contains("[rules]"));
}

#[test]
fn given_completions_flag_when_running_then_prints_script() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &["--completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("yamlshade"));
}

#[test]
fn given_init_config_flag_when_running_then_prints_template_without_file() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    let output = run(temp.path(), &["--init-config"]);

    // Assert
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("# yamlshade configuration"));
    assert!(out.contains("[rules]"));
}

#[test]
fn given_number_forms_when_running_then_prints_them_as_written() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("nums.yaml");
    std::fs::write(&file, "version: 1.10\nport: 0x1F # hex\n").unwrap();

    let output = run(temp.path(), &["--color", "never", file.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "version: 1.10\nport: 0x1F # hex\n");
}

#[test]
fn given_color_env_var_when_running_then_config_layer_applies_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("pod.yaml"), POD).unwrap();

    // Act
    let output = Command::new(env!("CARGO_BIN_EXE_yamlshade"))
        .arg("pod.yaml")
        .current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env("YAMLSHADE_COLOR", "always")
        .env_remove("YAMLSHADE_INDENT")
        .output()
        .expect("run yamlshade");

    // Assert
    assert!(output.status.success());
    assert!(stdout(&output).contains("\u{1b}["));
}
