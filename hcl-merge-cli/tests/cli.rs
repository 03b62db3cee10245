//! End-to-end tests that run the `hcl-merge` binary.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn path(&self, name: &str) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name))
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp path {}", path.display()))
    }

    fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.path(name)?;
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    fn merge_command(&self, destination: &str, source: &str) -> Result<Command> {
        let dst = self.write("dst.hcl", destination)?;
        let src = self.write("src.hcl", source)?;
        let out = self.path("out.hcl")?;
        let mut cmd = binary();
        cmd.args(["--dst-file", dst.as_str()])
            .args(["--src-file", src.as_str()])
            .args(["--write-file", out.as_str()]);
        Ok(cmd)
    }

    /// Converts the written output back to JSON with the binary itself.
    fn output_as_json(&self) -> Result<Value> {
        let text = std::fs::read_to_string(self.path("out.hcl")?).context("read output")?;
        let output = binary()
            .args(["--convert", "to-json"])
            .write_stdin(text)
            .output()
            .context("run conversion")?;
        ensure!(output.status.success(), "conversion failed");
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

fn binary() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hcl-merge"));
    cmd.env_remove("HCL_MERGE_ECHO_NOTATION")
        .env_remove("HCL_MERGE_LOG_FILTER")
        .env("RUST_BACKTRACE", "0");
    cmd
}

#[fixture]
fn workspace() -> Workspace {
    #[expect(clippy::expect_used, reason = "test fixtures may panic")]
    let dir = tempfile::tempdir().expect("create temporary directory");
    Workspace { dir }
}

#[test]
fn version_prints_the_package_version() {
    binary()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
fn merge_writes_the_overridden_document(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command(
            "port = 8080\n\ntls {\n  enabled = false\n}\n",
            "port = 9090\n\ntls {\n  enabled = true\n}\n",
        )?
        .assert()
        .success();
    let merged = workspace.output_as_json()?;
    ensure!(
        merged == json!({"port": 9090, "tls": {"enabled": true}}),
        "unexpected output {merged}"
    );
    Ok(())
}

#[rstest]
fn empty_source_values_keep_the_destination(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command(
            "name = \"svc-a\"\nreplicas = 3\n",
            "name = \"\"\nreplicas = 5\n",
        )?
        .assert()
        .success();
    let merged = workspace.output_as_json()?;
    ensure!(merged == json!({"name": "svc-a", "replicas": 5}), "unexpected output {merged}");
    Ok(())
}

#[rstest]
fn stdout_echoes_the_merged_json(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command("port = 8080\nname = \"a\"\n", "port = 9090\n")?
        .assert()
        .success()
        .stdout("{\n  \"port\": 9090,\n  \"name\": \"a\"\n}\n");
    Ok(())
}

#[rstest]
fn quiet_suppresses_the_echo(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command("port = 8080\n", "port = 9090\n")?
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    ensure!(workspace.path("out.hcl")?.exists(), "output was not written");
    Ok(())
}

#[rstest]
fn echo_can_be_disabled_from_the_environment(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command("port = 8080\n", "port = 9090\n")?
        .env("HCL_MERGE_ECHO_NOTATION", "false")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[rstest]
fn malformed_destination_leaves_no_output(workspace: Workspace) -> Result<()> {
    workspace
        .merge_command("tls {\n  enabled = \n", "port = 1\n")?
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("decode destination"))
        .stderr(predicate::str::contains("dst.hcl"));
    ensure!(!workspace.path("out.hcl")?.exists(), "output must not be created");
    Ok(())
}

#[rstest]
fn failed_merge_keeps_a_previous_output(workspace: Workspace) -> Result<()> {
    let previous = workspace.write("out.hcl", "kept = true\n")?;
    workspace
        .merge_command("port = 1\n", "port = {\n")?
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode source"));
    ensure!(std::fs::read_to_string(previous)? == "kept = true\n");
    Ok(())
}

#[rstest]
fn missing_source_file_is_reported(workspace: Workspace) -> Result<()> {
    let dst = workspace.write("dst.hcl", "port = 1\n")?;
    let out = workspace.path("out.hcl")?;
    binary()
        .args(["--dst-file", dst.as_str()])
        .args(["--src-file", workspace.path("absent.hcl")?.as_str()])
        .args(["--write-file", out.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read file"))
        .stderr(predicate::str::contains("absent.hcl"));
    ensure!(!out.exists());
    Ok(())
}

#[rstest]
#[case::no_flags(&[][..])]
#[case::missing_write_file(&["--dst-file", "a.hcl", "--src-file", "b.hcl"][..])]
#[case::unknown_mode(&["--convert", "to-yaml"][..])]
fn invalid_arguments_fail(#[case] args: &[&str]) {
    binary().args(args).assert().failure();
}

#[test]
fn converts_hcl_to_json() {
    binary()
        .args(["--convert", "to-json"])
        .write_stdin("port = 9090\nname = \"a\"\n")
        .assert()
        .success()
        .stdout("{\n  \"port\": 9090,\n  \"name\": \"a\"\n}\n");
}

#[test]
fn converts_json_to_hcl() -> Result<()> {
    let output = binary()
        .args(["--convert", "to-hcl"])
        .write_stdin(r#"{"port": 9090, "tls": {"enabled": true}}"#)
        .output()?;
    ensure!(output.status.success(), "conversion failed");
    let text = String::from_utf8(output.stdout)?;
    ensure!(text.contains("port = 9090"), "unexpected HCL:\n{text}");
    ensure!(text.contains("tls {"), "unexpected HCL:\n{text}");
    Ok(())
}

#[test]
fn invalid_json_on_stdin_is_reported() {
    binary()
        .args(["--convert", "to-hcl"])
        .write_stdin("{\"port\": }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<stdin>"));
}

#[test]
fn invalid_hcl_on_stdin_names_the_document_stage() {
    binary()
        .args(["--convert", "to-json"])
        .write_stdin("port = {\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode document failed"))
        .stderr(predicate::str::contains("decode source").not());
}
