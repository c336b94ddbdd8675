//! CLI arg parsing tests for twintop_agent (server)
use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_help_mentions_port_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_twintop_agent"))
        .arg("--help")
        .output()
        .expect("run twintop_agent --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("--port") && text.contains("-p"), "{text}");
}

#[test]
fn test_port_short_long() {
    // We verify port flags are accepted by ensuring the process starts (then we kill quickly).
    // Use an unlikely port to avoid conflicts.
    let mut child = Command::cargo_bin("twintop_agent")
        .expect("binary exists")
        .args(["--port", "9555"])
        .spawn()
        .expect("spawn agent");
    // Give it a moment to bind
    std::thread::sleep(std::time::Duration::from_millis(150));
    assert!(child.try_wait().expect("poll agent").is_none(), "agent exited early");
    let _ = child.kill();
    let _ = child.wait();

    let mut child2 = Command::cargo_bin("twintop_agent")
        .expect("binary exists")
        .args(["-p", "9556"])
        .spawn()
        .expect("spawn agent");
    std::thread::sleep(std::time::Duration::from_millis(150));
    assert!(child2.try_wait().expect("poll agent").is_none(), "agent exited early");
    let _ = child2.kill();
    let _ = child2.wait();
}
