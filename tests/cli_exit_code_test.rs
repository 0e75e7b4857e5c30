#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Writes a stand-in for dfx that records the upload argument and answers
/// the verification query with `verify_reply`.
fn fake_dfx(dir: &Path, upload_status: i32, verify_reply: &str) -> PathBuf {
    let script = dir.join("fake-dfx");
    let captured = dir.join("captured-argument");
    let body = format!(
        "#!/bin/sh\n\
         case \"$4\" in\n\
           uploadIcrc151Wasm) cat > '{}'; echo '()'; exit {} ;;\n\
           hasIcrc151Wasm) echo '{}' ;;\n\
           *) echo \"unexpected call: $*\" >&2; exit 2 ;;\n\
         esac\n",
        captured.display(),
        upload_status,
        verify_reply
    );
    std::fs::write(&script, body).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_wasm-upload"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// One test function: the scenarios spawn scripts written moments earlier and
// must not race with each other.
#[test]
fn test_exit_codes_end_to_end() {
    // success
    let dir = TempDir::new().unwrap();
    let wasm = dir.path().join("icrc151.wasm");
    std::fs::write(&wasm, [0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    let dfx = fake_dfx(dir.path(), 0, "(true)");

    let output = run_cli(&[
        wasm.to_str().unwrap(),
        "marketfactory",
        "--dfx",
        dfx.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("ICRC-151 WASM Upload"));
    assert!(stdout.contains("WASM size: 4 bytes"));
    assert!(stdout.contains("SUCCESS"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("captured-argument")).unwrap(),
        r#"(blob "\de\ad\be\ef")"#
    );

    // verification reply without the marker
    let dir = TempDir::new().unwrap();
    let wasm = dir.path().join("icrc151.wasm");
    std::fs::write(&wasm, [0x00]).unwrap();
    let dfx = fake_dfx(dir.path(), 0, "(false)");

    let output = run_cli(&[wasm.to_str().unwrap(), "--dfx", dfx.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("FAILED"));

    // upload rejected
    let dir = TempDir::new().unwrap();
    let wasm = dir.path().join("icrc151.wasm");
    std::fs::write(&wasm, [0x00]).unwrap();
    let dfx = fake_dfx(dir.path(), 1, "(true)");

    let output = run_cli(&[wasm.to_str().unwrap(), "--dfx", dfx.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    // missing payload
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.wasm");
    let dfx = fake_dfx(dir.path(), 0, "(true)");

    let output = run_cli(&[missing.to_str().unwrap(), "--dfx", dfx.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("WASM file not found"));
    assert!(!dir.path().join("captured-argument").exists());

    // dfx not installed
    let dir = TempDir::new().unwrap();
    let wasm = dir.path().join("icrc151.wasm");
    std::fs::write(&wasm, [0x00]).unwrap();

    let output = run_cli(&[
        wasm.to_str().unwrap(),
        "--dfx",
        dir.path().join("no-dfx-here").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
}
