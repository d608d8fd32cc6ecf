use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn codetok() -> Command {
    Command::cargo_bin("codetok").expect("codetok binary")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// ============== tokenizer: basic mode ==============

#[test]
fn basic_single_file_summary() {
    let mut cmd = codetok();
    cmd.arg(fixtures_dir().join("sample_code/example.py"))
        .arg("--mode")
        .arg("basic")
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 1 code file(s) to process."))
        .stdout(predicate::str::contains("--- Summary ---"))
        .stdout(predicate::str::contains("tokens (basic)"))
        .stdout(predicate::str::contains(
            "Total tokens across all processed files:",
        ));
}

#[test]
fn basic_directory_discovers_fixtures() {
    let mut cmd = codetok();
    cmd.arg(fixtures_dir().join("sample_code"))
        .arg("--mode")
        .arg("basic")
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 2 code file(s) to process."));
}

#[test]
fn basic_output_file_is_space_separated_and_sorted() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/b.py"), "y += 2");
    write_file(&temp.path().join("src/a.py"), "x = 1");

    let out = temp.path().join("out/tokens.txt");
    let mut cmd = codetok();
    cmd.arg(temp.path().join("src"))
        .arg("--mode")
        .arg("basic")
        .arg("--output")
        .arg(&out)
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Output saved successfully."));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "x = 1 y += 2");
}

#[test]
fn extensions_flag_overrides_allow_list() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("keep.rs"), "fn main() {}");
    write_file(&temp.path().join("skip.py"), "x = 1");

    let mut cmd = codetok();
    cmd.arg(temp.path())
        .arg("--mode")
        .arg("basic")
        .arg("--extensions")
        .arg("rs")
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 1 code file(s) to process."));
}

#[test]
fn verbose_prints_per_file_progress() {
    let mut cmd = codetok();
    cmd.arg(fixtures_dir().join("sample_code/example.go"))
        .arg("--mode")
        .arg("basic")
        .arg("--verbose")
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Processing: "))
        .stdout(predicate::str::contains("  Tokens (basic): "));
}

// ============== tokenizer: exit codes ==============

#[test]
fn missing_input_path_exits_zero() {
    let temp = tempdir().unwrap();
    let mut cmd = codetok();
    cmd.arg(temp.path().join("does-not-exist"))
        .arg("--mode")
        .arg("basic");

    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("No code files found to process."));
}

#[test]
fn empty_directory_exits_zero() {
    let temp = tempdir().unwrap();
    let mut cmd = codetok();
    cmd.arg(temp.path()).arg("--mode").arg("basic");

    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("No code files found to process."));
}

#[test]
fn unsupported_extension_single_file_exits_one() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("image.xyz"), "not code");

    let mut cmd = codetok();
    cmd.arg(temp.path().join("image.xyz"))
        .arg("--mode")
        .arg("basic");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported extension"));
}

#[test]
fn rejects_unknown_mode() {
    let mut cmd = codetok();
    cmd.arg(".").arg("--mode").arg("fancy");
    cmd.assert().failure();
}

// ============== tokenizer: external mode ==============

#[cfg(feature = "tiktoken")]
mod external {
    use super::*;

    #[test]
    fn external_output_round_trips_one_entry_per_file() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("code/a.py"), "x = 1\n");
        write_file(&temp.path().join("code/b.py"), "def f():\n    return 2\n");

        let out = temp.path().join("ids.json");
        let mut cmd = codetok();
        cmd.arg(temp.path().join("code"))
            .arg("--mode")
            .arg("external")
            .arg("--output")
            .arg(&out)
            .arg("--no-color");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("tokens (external)"));

        let parsed: Vec<Value> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        for entry in &parsed {
            let ids = entry.as_array().expect("list of token IDs");
            assert!(!ids.is_empty());
            assert!(ids.iter().all(Value::is_u64));
        }
    }

    #[test]
    fn external_unknown_model_warns_and_falls_back() {
        let mut cmd = codetok();
        cmd.arg(fixtures_dir().join("sample_code/example.py"))
            .arg("--mode")
            .arg("external")
            .arg("--model")
            .arg("not-a-real-model")
            .arg("--no-color");

        cmd.assert()
            .success()
            .stderr(predicate::str::contains("Falling back to 'cl100k_base'"));
    }
}

// ============== csv2json ==============

fn csv2json() -> Command {
    Command::cargo_bin("csv2json").expect("csv2json binary")
}

#[test]
fn csv2json_converts_to_stdout() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("people.csv");
    write_file(&input, "First Name,Age\nAda,36\nGrace,45\n");

    let mut cmd = csv2json();
    cmd.arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""first_name":"Ada""#))
        .stdout(predicate::str::contains("Successfully converted 2 rows"));
}

#[test]
fn csv2json_writes_pretty_output_file() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("rows.csv");
    write_file(&input, "k,v\na,1\n");

    let out = temp.path().join("rows.json");
    let mut cmd = csv2json();
    cmd.arg(&input).arg("-o").arg(&out).arg("-i").arg("2");

    cmd.assert().success();

    let parsed: Vec<Value> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["k"], "a");
    assert_eq!(parsed[0]["v"], "1");
}

#[test]
fn csv2json_missing_input_exits_one() {
    let mut cmd = csv2json();
    cmd.arg("/no/such/file.csv");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

// ============== render-html ==============

#[test]
fn render_html_missing_file_exits_one() {
    let mut cmd = Command::cargo_bin("render-html").expect("render-html binary");
    cmd.arg("/no/such/page.html");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}
