use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_html2runs"))
}

fn temp_file(name: &str, ext: &str, contents: &str) -> PathBuf {
    let mut path = env::temp_dir();
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("time");
    path.push(format!(
        "html2runs_cli_{}_{}_{}.{}",
        name,
        now.as_secs(),
        now.subsec_nanos(),
        ext
    ));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn file_input_prints_pretty_json() {
    let input = temp_file("pretty", "html", "<div><b>Bold</b> and <i>italic</i></div>");
    let output = Command::new(bin_path())
        .arg(&input)
        .output()
        .expect("run");
    fs::remove_file(&input).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('\n'), "expected indented output");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(
        value,
        serde_json::json!([{ "content": [
            { "style": "bold", "content": "Bold" },
            { "style": "normal", "content": " and " },
            { "style": "italic", "content": "italic" }
        ] }])
    );
}

#[test]
fn stdin_input_with_compact_output() {
    let mut child = Command::new(bin_path())
        .arg("--compact")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"<div>A</div><div>B</div>")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"[{"content":[{"style":"normal","content":"A"}]},{"content":[{"style":"normal","content":"B"}]}]"#
    );
}

#[test]
fn config_file_overrides_threshold() {
    let input = temp_file("threshold", "html", r#"<span style="font-weight:650">x</span>"#);
    let config = temp_file("threshold", "toml", "[weight]\nbold_threshold = 700\n");
    let output = Command::new(bin_path())
        .args(["--compact", "--config"])
        .arg(&config)
        .arg(&input)
        .output()
        .expect("run");
    fs::remove_file(&input).ok();
    fs::remove_file(&config).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""style":"normal""#), "got {stdout}");
}

#[test]
fn output_flag_writes_file() {
    let input = temp_file("write", "html", "<p>saved</p>");
    let target = env::temp_dir().join(format!(
        "html2runs_cli_out_{}.json",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos()
    ));
    let output = Command::new(bin_path())
        .arg(&input)
        .arg("-o")
        .arg(&target)
        .output()
        .expect("run");
    fs::remove_file(&input).ok();

    assert!(output.status.success());
    let written = fs::read_to_string(&target).expect("output file");
    fs::remove_file(&target).ok();
    assert!(written.contains("saved"));
}

#[test]
fn missing_input_reports_error_and_exit_code() {
    let output = Command::new(bin_path())
        .arg("/nonexistent/input.html")
        .output()
        .expect("run");

    assert!(!output.status.success(), "expected error exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: failed to read"), "got {stderr}");
}

#[test]
fn invalid_config_reports_error() {
    let config = temp_file("bad", "toml", "[weight]\nbold_threshold = \"heavy\"\n");
    let output = Command::new(bin_path())
        .arg("--config")
        .arg(&config)
        .stdin(Stdio::null())
        .output()
        .expect("run");
    fs::remove_file(&config).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "got {stderr}");
}

#[test]
fn prints_default_config() {
    let output = Command::new(bin_path())
        .arg("--print-default-config")
        .output()
        .expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bold_threshold = 600"));
}
