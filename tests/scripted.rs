#![cfg(target_os = "linux")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_script_with(home: &Path, args: &[&str], script: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_spelltrie"))
        .args(args)
        .env("HOME", home)
        .env_remove("SPELLTRIE_CONFIG")
        .env_remove("SPELLTRIE_EDITMODE")
        .env_remove("SPELLTRIE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn spelltrie");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin.write_all(script.as_bytes()).expect("write");
    }
    let output = child.wait_with_output().expect("wait");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(1);
    (stdout, stderr, code)
}

fn run_script(script: &str) -> (String, String, i32) {
    let home = TempDir::new().expect("tempdir");
    run_script_with(home.path(), &[], script)
}

#[test]
fn scripted_insert_and_lookups() {
    let script = "insert bob a bat ass za z z Bob\nfreq z\nfreq Bob\ncontains zed\nsize\nexit\n";
    let (out, err, code) = run_script(script);
    assert!(err.is_empty(), "stderr: {err}");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "bob 1", "a 1", "bat 1", "ass 1", "za 1", "z 1", "z 2", "Bob 1", "2", "1", "false",
            "7"
        ]
    );
    assert_eq!(code, 0);
}

#[test]
fn scripted_remove_clears_every_occurrence() {
    let script = "add x x x\nrm x x\ncontains x\nfreq x\nsize\n";
    let (out, err, code) = run_script(script);
    assert!(err.is_empty(), "stderr: {err}");
    assert_eq!(out, "x 1\nx 2\nx 3\nx removed\nx absent\nfalse\n0\n0\n");
    assert_eq!(code, 0);
}

#[test]
fn scripted_best_match() {
    let script = "match hello\nadd hello hello help world\nmatch helo\nmatch wrld 100\nmatch hello 0\n";
    let (out, err, code) = run_script(script);
    assert!(err.is_empty(), "stderr: {err}");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "(no match)");
    // "helo" is one edit from both; the more frequent word wins.
    assert_eq!(lines[5], "hello");
    assert_eq!(lines[6], "world");
    assert!(["hello", "help", "world"].contains(&lines[7]), "{}", lines[7]);
    assert_eq!(code, 0);
}

#[test]
fn scripted_load_and_list() {
    let dir = TempDir::new().expect("tempdir");
    let text = dir.path().join("text.txt");
    std::fs::write(&text, "The cat, the hat.\nthe_end 42\n").unwrap();
    let script = format!("load {}\nwords the\nsize\ntree\n", text.display());
    let (out, err, code) = run_script_with(dir.path(), &[], &script);
    assert!(err.is_empty(), "stderr: {err}");
    let mut lines = out.lines();
    let loaded = lines.next().unwrap();
    assert!(
        loaded.starts_with(&format!("loaded 6 words from {} in ", text.display())),
        "{loaded}"
    );
    assert!(loaded.ends_with('s'));
    assert_eq!(lines.next(), Some("the 1"));
    assert_eq!(lines.next(), Some("the_end 1"));
    assert_eq!(lines.next(), Some("6"));
    assert_eq!(lines.next(), Some("4 (0)"));
    assert_eq!(code, 0);
}

#[test]
fn scripted_dictionary_arguments_and_ignore_case() {
    let dir = TempDir::new().expect("tempdir");
    let text = dir.path().join("names.txt");
    std::fs::write(&text, "Alice ALICE alice Bob\n").unwrap();
    let (out, err, code) = run_script_with(
        dir.path(),
        &["--ignore-case", text.to_str().unwrap()],
        "freq aLiCe\nsize\n",
    );
    assert!(err.is_empty(), "stderr: {err}");
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("loaded 4 words from "));
    assert_eq!(&lines[1..], ["3", "2"]);
    assert_eq!(code, 0);
}

#[test]
fn scripted_config_file() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join(".spelltrierc"),
        "case_sensitive = false\nbogus = 1\n",
    )
    .unwrap();
    let (out, err, code) = run_script_with(dir.path(), &[], "add Word word\nsize\n");
    assert_eq!(err.trim(), "config:2: unknown key 'bogus'");
    assert_eq!(out, "Word 1\nword 2\n1\n");
    assert_eq!(code, 0);
}

#[test]
fn scripted_errors_keep_going() {
    let script = "insrt a\ninsert 'open\nload /no/such/file.txt\nsize\n";
    let (out, err, code) = run_script(script);
    assert_eq!(out, "0\n");
    assert!(err.contains("unknown command 'insrt'"), "stderr: {err}");
    assert!(err.contains("did you mean 'insert'?"), "stderr: {err}");
    assert!(err.contains("unterminated ' quote"), "stderr: {err}");
    assert!(err.contains("cannot read /no/such/file.txt"), "stderr: {err}");
    assert_eq!(code, 0);
}

#[test]
fn scripted_exit_status_follows_last_command() {
    let (_, err, code) = run_script("size\nfreq\n");
    assert!(err.contains("usage: freq <word>"), "stderr: {err}");
    assert_eq!(code, 1);

    let (_, _, code) = run_script("insert \"a\n");
    assert_eq!(code, 2);
}
