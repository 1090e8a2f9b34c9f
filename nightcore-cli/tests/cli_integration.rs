use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn nightcore_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nightcore").expect("Failed to find nightcore binary");
    cmd.env_remove("NIGHTCORE_ENGINE")
        .env_remove("NIGHTCORE_STAGING_DIR");
    cmd
}

// --- graph ---

#[test]
fn test_graph_defaults() {
    nightcore_cmd()
        .arg("graph")
        .assert()
        .success()
        .stdout("rubberband=tempo=1.3:pitch=1.259921\n");
}

#[test]
fn test_graph_neutral_parameters_pass_through() {
    nightcore_cmd()
        .args(["graph", "--speed", "1.0", "--pitch", "0"])
        .assert()
        .success()
        .stdout("anull\n");
}

#[test]
fn test_graph_echo_only() {
    nightcore_cmd()
        .args(["graph", "--speed", "1", "--pitch", "0", "--echo", "50"])
        .assert()
        .success()
        .stdout("aecho=0.8:0.9:0.05:0.3\n");
}

#[test]
fn test_graph_clamps_out_of_range_values() {
    nightcore_cmd()
        .args(["graph", "--speed", "5", "--pitch", "-3", "--volume", "9", "--treble", "-40"])
        .assert()
        .success()
        .stdout(
            "rubberband=tempo=2:pitch=1,volume=2,bass=g=0:f=100:w=0.5,\
             treble=g=-10:f=10000:w=0.5\n",
        );
}

#[test]
fn test_graph_reads_parameter_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let params = dir.path().join("params.json");
    fs::write(&params, r#"{"speed": 1.0, "pitch": 0, "reverb": 50}"#)?;

    nightcore_cmd()
        .arg("graph")
        .arg("--params")
        .arg(&params)
        .assert()
        .success()
        .stdout("aecho=0.8:0.88:30:0.4\n");
    Ok(())
}

#[test]
fn test_graph_rejects_malformed_parameter_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let params = dir.path().join("params.json");
    fs::write(&params, "{ speed: fast }")?;

    nightcore_cmd()
        .arg("graph")
        .arg("--params")
        .arg(&params)
        .assert()
        .code(65)
        .stderr(contains("Invalid parameter file"));
    Ok(())
}

// --- check / convert against a fake engine ---

#[cfg(unix)]
mod with_fake_engine {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const VERSION_PREAMBLE: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version 6.1-fake"
  exit 0
fi
"#;

    const COPYING_ENGINE: &str = r#"
input=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ]; then input="$arg"; fi
  prev="$arg"
  last="$arg"
done
cp "$input" "$last"
"#;

    const FAILING_ENGINE: &str = r#"
echo "[error] Invalid filter graph" >&2
exit 1
"#;

    struct Workspace {
        root: TempDir,
        engine: PathBuf,
        staging: PathBuf,
    }

    impl Workspace {
        fn new(engine_body: &str) -> Self {
            let root = tempdir().unwrap();
            let engine = root.path().join("fake-ffmpeg");
            fs::write(&engine, format!("{VERSION_PREAMBLE}{engine_body}")).unwrap();
            fs::set_permissions(&engine, fs::Permissions::from_mode(0o755)).unwrap();
            let staging = root.path().join("staging");
            Self {
                root,
                engine,
                staging,
            }
        }

        fn input(&self, name: &str, contents: &[u8]) -> PathBuf {
            let path = self.root.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn cmd(&self) -> Command {
            let mut cmd = nightcore_cmd();
            cmd.arg("--engine")
                .arg(&self.engine)
                .arg("--staging-dir")
                .arg(&self.staging);
            cmd
        }

        fn staging_is_empty(&self) -> bool {
            fs::read_dir(&self.staging)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(true)
        }
    }

    fn json_line(output: &[u8]) -> serde_json::Value {
        serde_json::from_slice(output).expect("stdout should be a JSON report")
    }

    #[test]
    #[serial]
    fn test_check_reports_version() {
        let ws = Workspace::new("exit 0\n");
        ws.cmd()
            .arg("check")
            .assert()
            .success()
            .stdout(contains("ffmpeg version 6.1-fake"));
    }

    #[test]
    #[serial]
    fn test_check_missing_engine() {
        let ws = Workspace::new("exit 0\n");
        nightcore_cmd()
            .arg("--engine")
            .arg(ws.root.path().join("no-such-ffmpeg"))
            .arg("check")
            .assert()
            .code(69)
            .stderr(contains("not installed or not executable"));
    }

    #[test]
    #[serial]
    fn test_convert_writes_beside_input_and_keeps_original() {
        let ws = Workspace::new(COPYING_ENGINE);
        let input = ws.input("song.mp3", b"fake mp3 bytes");

        ws.cmd()
            .arg("convert")
            .arg(&input)
            .assert()
            .success()
            .stdout(contains("Conversion complete"));

        let output = ws.root.path().join("nightcore_song.mp3");
        assert_eq!(fs::read(&output).unwrap(), b"fake mp3 bytes");
        assert_eq!(fs::read(&input).unwrap(), b"fake mp3 bytes");
        assert!(ws.staging_is_empty());
    }

    #[test]
    #[serial]
    fn test_convert_into_output_directory_with_json() {
        let ws = Workspace::new(COPYING_ENGINE);
        let input = ws.input("take two.wav", b"wav");
        let out_dir = ws.root.path().join("out");
        fs::create_dir(&out_dir).unwrap();

        let assert = ws
            .cmd()
            .arg("convert")
            .arg(&input)
            .arg("-o")
            .arg(&out_dir)
            .args(["--speed", "1.5", "--json"])
            .assert()
            .success();

        let report = json_line(&assert.get_output().stdout);
        assert_eq!(report["status"], "ok");
        assert_eq!(report["bytes"], 3);
        assert_eq!(report["filterGraph"], "rubberband=tempo=1.5:pitch=1.259921");
        assert!(out_dir.join("nightcore_take two.wav").exists());
        assert!(ws.staging_is_empty());
    }

    #[test]
    #[serial]
    fn test_convert_engine_failure() {
        let ws = Workspace::new(FAILING_ENGINE);
        let input = ws.input("song.ogg", b"ogg");

        ws.cmd()
            .arg("convert")
            .arg(&input)
            .assert()
            .code(70)
            .stderr(contains("Invalid filter graph"));

        assert!(!ws.root.path().join("nightcore_song.ogg").exists());
        assert!(input.exists());
        assert!(ws.staging_is_empty());
    }

    #[test]
    #[serial]
    fn test_convert_failure_reported_once() {
        let ws = Workspace::new(FAILING_ENGINE);
        let input = ws.input("song.ogg", b"ogg");

        let assert = ws.cmd().arg("convert").arg(&input).assert().code(70);

        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
        assert_eq!(stderr.matches("Invalid filter graph").count(), 1, "{stderr}");
        assert!(!stderr.contains("[ERROR]"), "{stderr}");
        assert!(stderr.contains("error:"), "{stderr}");
    }

    #[test]
    #[serial]
    fn test_convert_engine_failure_json() {
        let ws = Workspace::new(FAILING_ENGINE);
        let input = ws.input("song.ogg", b"ogg");

        let assert = ws
            .cmd()
            .arg("convert")
            .arg(&input)
            .arg("--json")
            .assert()
            .code(70);

        let report = json_line(&assert.get_output().stdout);
        assert_eq!(report["status"], "error");
        assert_eq!(report["kind"], "engine_execution_failed");
    }

    #[test]
    #[serial]
    fn test_convert_missing_engine() {
        let ws = Workspace::new("exit 0\n");
        let input = ws.input("song.mp3", b"mp3");

        nightcore_cmd()
            .arg("--engine")
            .arg(ws.root.path().join("no-such-ffmpeg"))
            .arg("--staging-dir")
            .arg(&ws.staging)
            .arg("convert")
            .arg(&input)
            .assert()
            .code(69);
        assert!(ws.staging_is_empty());
    }

    #[test]
    #[serial]
    fn test_convert_clean_exit_without_output() {
        let ws = Workspace::new("exit 0\n");
        let input = ws.input("song.mp3", b"mp3");

        ws.cmd()
            .arg("convert")
            .arg(&input)
            .assert()
            .code(70)
            .stderr(contains("produced no output"));
    }

    #[test]
    #[serial]
    fn test_convert_rejects_unsupported_type() {
        let ws = Workspace::new(COPYING_ENGINE);
        let input = ws.input("notes.txt", b"text");

        ws.cmd()
            .arg("convert")
            .arg(&input)
            .assert()
            .code(65)
            .stderr(contains("Unsupported file type"));
        assert!(!ws.root.path().join("nightcore_notes.txt").exists());
    }

    #[test]
    #[serial]
    fn test_convert_enforces_size_limit() {
        let ws = Workspace::new(COPYING_ENGINE);
        let input = ws.input("big.wav", &vec![0u8; 1024 * 1024 + 1]);

        ws.cmd()
            .arg("convert")
            .arg(&input)
            .args(["--max-upload-mb", "1"])
            .assert()
            .code(65)
            .stderr(contains("maximum size"));
        assert!(ws.staging_is_empty());
    }

    #[test]
    #[serial]
    fn test_log_dir_receives_log_file() {
        let ws = Workspace::new(COPYING_ENGINE);
        let input = ws.input("song.mp3", b"mp3");
        let log_dir = ws.root.path().join("logs");

        ws.cmd()
            .arg("--log-dir")
            .arg(&log_dir)
            .arg("convert")
            .arg(&input)
            .assert()
            .success();

        let logs: Vec<PathBuf> = fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(logs.len(), 1);
        let contents = fs::read_to_string(&logs[0]).unwrap();
        assert!(contents.contains("Conversion finished"), "{contents}");
    }
}

#[test]
fn test_convert_non_existent_input() {
    nightcore_cmd()
        .args(["convert", "surely/this/does/not/exist/input.mp3"])
        .assert()
        .code(66)
        .stderr(contains("Invalid input path"));
}

#[test]
fn test_convert_requires_input() {
    nightcore_cmd()
        .arg("convert")
        .assert()
        .failure()
        .stderr(contains("INPUT_FILE").or(contains("required")));
}
