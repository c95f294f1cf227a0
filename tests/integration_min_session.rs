// Drives the compiled binary through a PTY: open the only file in a
// throwaway folder, type it, back out to the browser and quit.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

fn pause() {
    std::thread::sleep(Duration::from_millis(200));
}

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("hi.txt"), "hi\n")?;

    let bin = assert_cmd::cargo::cargo_bin("codetype");
    let cmd = format!("{} {}", bin.display(), dir.path().display());

    let mut p = spawn(cmd)?;
    pause();

    // open the highlighted file
    p.send("\r")?;
    pause();

    p.send("hi")?;
    pause();

    // first ESC leaves the file, second quits from the browser
    p.send("\x1b")?;
    pause();
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
