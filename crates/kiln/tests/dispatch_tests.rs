//! Integration tests for command dispatch through the kiln binary
//!
//! Each test runs the compiled binary in a scratch directory with an isolated
//! HOME and a config file pointing the generator at a shell script.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

struct Sandbox {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp_dir.path()).unwrap().join("work");
        std::fs::create_dir_all(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Write a config whose generator stores its request payload in `request.json`
    fn with_recording_generator(self) -> Self {
        let out = self.root.join("request.json");
        let config = format!(
            "generator:\n  program: sh\n  args: [\"-c\", 'printf \"%s\" \"$3\" > \"$1\"', \"sh\", \"{}\"]\n",
            out
        );
        std::fs::write(self.root.join("kiln.yaml"), config).unwrap();
        self
    }

    fn write_config(&self, content: &str) {
        std::fs::write(self.root.join("kiln.yaml"), content).unwrap();
    }

    fn command(&self, dir: &Utf8Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kiln"));
        cmd.current_dir(dir)
            .env("HOME", self.root.as_str())
            .env_remove("KILN_TEST")
            .env_remove("KILN_DEBUG")
            .env_remove("KILN_PROXY")
            .env_remove("KILN_CONFIG");
        if self.root.join("kiln.yaml").exists() {
            cmd.arg("--config").arg(self.root.join("kiln.yaml"));
        }
        cmd.args(args);
        cmd
    }

    fn kiln(&self, args: &[&str]) -> Output {
        self.command(&self.root, args).output().unwrap()
    }
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_no_command_prints_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&[]);

    assert!(output.status.success());
    let text = combined(&output);
    assert!(text.contains("Usage: kiln <command> [options]"));
    assert!(text.contains("create [options] <app-name>"));
}

#[test]
fn test_typo_suggests_and_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["buidl"]);

    assert_eq!(output.status.code(), Some(1));
    let text = combined(&output);
    assert!(text.contains("Unknown command buidl."));
    assert!(text.contains("Did you mean build?"));
}

#[test]
fn test_far_typo_has_no_suggestion() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["deploy-everything"]);

    assert_eq!(output.status.code(), Some(1));
    let text = combined(&output);
    assert!(text.contains("Unknown command deploy-everything."));
    assert!(!text.contains("Did you mean"));
}

#[test]
fn test_command_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["create", "--help"]);

    assert!(output.status.success());
    let text = combined(&output);
    assert!(text.contains("Usage: kiln create [options] <app-name>"));
    assert!(text.contains("-p, --preset <presetName>"));
}

#[test]
fn test_missing_app_name() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["create"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Missing required argument <app-name>."));
}

#[test]
fn test_unknown_option() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["create", "my-app", "--colour"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Unknown option --colour."));
}

#[test]
fn test_invalid_name_is_rejected_before_generation() {
    let sandbox = Sandbox::new().with_recording_generator();
    let output = sandbox.kiln(&["create", "My App"]);

    assert_eq!(output.status.code(), Some(1));
    let text = combined(&output);
    assert!(text.contains("Invalid project name: \"My App\""));
    assert!(text.contains("Error: name can only contain URL-friendly characters"));
    assert!(!sandbox.root.join("request.json").exists());
}

#[test]
fn test_invalid_package_manager() {
    let sandbox = Sandbox::new().with_recording_generator();
    let output = sandbox.kiln(&["create", "my-app", "-m", "bun"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Unknown package manager: bun"));
}

#[cfg(unix)]
#[test]
fn test_force_create_end_to_end() {
    let sandbox = Sandbox::new().with_recording_generator();
    let target = sandbox.root.join("my-app");
    std::fs::create_dir_all(target.join("stale")).unwrap();

    let output = sandbox.kiln(&["create", "my-app", "--force", "--git", "init", "-m", "yarn"]);

    assert!(output.status.success(), "{}", combined(&output));
    assert!(!target.join("stale").exists());

    let request: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(sandbox.root.join("request.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(request["operation"], "create");
    assert_eq!(request["name"], "my-app");
    assert_eq!(request["target_dir"], target.as_str());
    assert_eq!(request["options"]["force"], true);
    assert_eq!(request["options"]["package_manager"], "yarn");
    assert_eq!(request["options"]["git"]["message"], "init");

    let text = combined(&output);
    assert!(text.contains("Successfully created project my-app."));
    assert!(text.contains("cd my-app"));
    assert!(text.contains("yarn serve"));
}

#[cfg(unix)]
#[test]
fn test_skip_get_started() {
    let sandbox = Sandbox::new().with_recording_generator();
    let output = sandbox.kiln(&["create", "my-app", "--skipGetStarted"]);

    assert!(output.status.success(), "{}", combined(&output));
    assert!(!combined(&output).contains("Get started"));
}

#[cfg(unix)]
#[test]
fn test_generator_failure_exits_with_one() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        "generator:\n  program: sh\n  args: [\"-c\", \"echo broken preset >&2; exit 4\", \"sh\"]\n",
    );
    let output = sandbox.kiln(&["create", "my-app"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("broken preset"));
}

#[test]
fn test_missing_generator_exits_with_one() {
    let sandbox = Sandbox::new();
    sandbox.write_config("generator:\n  program: kiln-generator-missing-for-tests\n");
    let output = sandbox.kiln(&["create", "my-app"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Failed to start generator"));
}

#[test]
fn test_engines_requirement_blocks_dispatch() {
    let sandbox = Sandbox::new();
    sandbox.write_config("engines:\n  kiln: \">=99\"\n");
    let output = sandbox.kiln(&["info"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("requires kiln >=99"));
}

#[cfg(unix)]
#[test]
fn test_pass_through_operation_forwards_invocation() {
    let sandbox = Sandbox::new();
    let out = sandbox.root.join("forward.txt");
    sandbox.write_config(&format!(
        "generator:\n  program: sh\n  args: [\"-c\", 'printf \"%s %s\" \"$2\" \"$3\" > \"$1\"', \"sh\", \"{}\"]\n",
        out
    ));

    let output = sandbox.kiln(&["add", "eslint", "--config", "airbnb"]);
    assert!(output.status.success(), "{}", combined(&output));

    let written = std::fs::read_to_string(&out).unwrap();
    let (operation, payload) = written.split_once(' ').unwrap();
    assert_eq!(operation, "add");

    let payload: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(payload["command"], "add");
    assert_eq!(payload["positionals"][0], "eslint");
    assert_eq!(payload["unknown"][0], "--config");
}

#[test]
fn test_version_flag() {
    let sandbox = Sandbox::new();
    let output = sandbox.kiln(&["--version"]);

    assert!(output.status.success());
    assert!(combined(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[cfg(unix)]
#[test]
fn test_test_mode_returns_the_error_unreported() {
    let sandbox = Sandbox::new();
    sandbox.write_config("generator:\n  program: sh\n  args: [\"-c\", \"exit 4\", \"sh\"]\n");

    let output = sandbox
        .command(&sandbox.root, &["create", "my-app"])
        .env("KILN_TEST", "1")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Generator 'sh' failed with exit status: 4"),
        "{}",
        stderr
    );
    assert!(!combined(&output).contains("✗"));
}

#[test]
fn test_dev_checkout_enables_debug_output() {
    let sandbox = Sandbox::new();
    let packages = sandbox.root.join("packages");
    let fixture = packages.join("test");
    std::fs::create_dir_all(&fixture).unwrap();

    let output = sandbox.command(&fixture, &[]).output().unwrap();
    assert!(output.status.success());
    assert!(!combined(&output).contains("Debug mode enabled"));

    std::fs::create_dir_all(packages.join("@kiln")).unwrap();
    let output = sandbox.command(&fixture, &[]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Debug mode enabled"));
}

#[cfg(unix)]
#[test]
fn test_generator_reads_the_terminal_stdin() {
    let sandbox = Sandbox::new();
    let out = sandbox.root.join("answer.txt");
    sandbox.write_config(&format!(
        "generator:\n  program: sh\n  args: [\"-c\", 'read answer; printf \"%s\" \"$answer\" > \"$1\"', \"sh\", \"{}\"]\n",
        out
    ));

    let mut child = sandbox
        .command(&sandbox.root, &["create", "my-app"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"vue-3-preset\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", combined(&output));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "vue-3-preset");
}
