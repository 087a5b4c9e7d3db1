//! End-to-end runs of the `referee` binary against shell-script collaborators.
//!
//! Each test builds a scratch directory holding `./main`, `./judge` and an
//! initial state file, then runs the binary there.
#![cfg(unix)]

use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::TempDir;

/// Serializes tests so no sibling thread forks while a script is open for writing.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_script(dir: &Path, name: &str, body: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)?;
    Ok(())
}

fn referee(dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_referee"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()?)
}

const PLAYER_MOVE1: &str = r#"#!/bin/sh
cat >/dev/null
printf 'MOVE1\n'
"#;

/// Logs its input, answers STATE1 first and STATE2 with winner 0 second.
const JUDGE_TWO_TURNS: &str = r#"#!/bin/sh
cat >> judge_inputs.log
n=$(cat turns 2>/dev/null || echo 0)
n=$((n + 1))
echo "$n" > turns
if [ "$n" -ge 2 ]; then
  printf 'STATE2\n\n0\n'
else
  printf 'STATE1\n'
fi
"#;

#[test]
fn test_two_turn_game_stdout() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(dir, "main", PLAYER_MOVE1)?;
    write_script(dir, "judge", JUDGE_TWO_TURNS)?;
    fs::write(dir.join("initial.txt"), "EMPTY\n")?;

    let output = referee(dir, &["initial.txt"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "MOVE1\n---\nSTATE1\n---\nMOVE1\n---\nSTATE2\n---\nPlayer 0 wins!\n"
    );

    // The judge saw the previous judge state and the trimmed move each turn.
    assert_eq!(
        fs::read_to_string(dir.join("judge_inputs.log"))?,
        "EMPTY\n\nMOVE1\n\nSTATE1\n\nMOVE1\n\n"
    );
    Ok(())
}

#[test]
fn test_player_receives_trimmed_state() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(
        dir,
        "main",
        "#!/bin/sh\ncat >> player_inputs.log\nprintf 'go\\n'\n",
    )?;
    write_script(dir, "judge", "#!/bin/sh\ncat >/dev/null\nprintf 'over\\n\\n1\\n'\n")?;
    fs::write(dir.join("initial.txt"), "  board:...\n\n  ")?;

    let output = referee(dir, &["initial.txt"])?;

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(dir.join("player_inputs.log"))?, "board:...\n\n");
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "go\n---\nover\n---\nPlayer 1 wins!\n"
    );
    Ok(())
}

#[test]
fn test_missing_initial_file_is_usage_error() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;

    let output = referee(temp_dir.path(), &["absent.txt"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't open 'absent.txt'"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_missing_judge_is_fatal() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(dir, "main", PLAYER_MOVE1)?;
    fs::write(dir.join("initial.txt"), "EMPTY")?;

    let output = referee(dir, &["initial.txt"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to start judge process `./judge`"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_non_integer_winner_is_fatal() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(dir, "main", PLAYER_MOVE1)?;
    write_script(dir, "judge", "#!/bin/sh\ncat >/dev/null\nprintf 'STATE\\n\\nabc\\n'\n")?;
    fs::write(dir.join("initial.txt"), "EMPTY")?;

    let output = referee(dir, &["initial.txt"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an integer"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_turn_cap_without_winner() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(dir, "main", PLAYER_MOVE1)?;
    // Identity judge: echoes the state section back, never declares a winner.
    write_script(dir, "judge", "#!/bin/sh\nsed -n '1p'\n")?;
    fs::write(dir.join("initial.txt"), "SAME")?;

    let output = referee(dir, &["initial.txt", "--max-turns", "3"])?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "MOVE1\n---\nSAME\n---\n".repeat(3)
    );
    Ok(())
}

#[test]
fn test_config_file_and_flags() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    write_script(dir, "bot", PLAYER_MOVE1)?;
    write_script(dir, "rules", "#!/bin/sh\ncat >/dev/null\nexit 3\n")?;
    fs::write(dir.join("initial.txt"), "EMPTY")?;
    fs::write(
        dir.join("referee.yml"),
        "player:\n  command: ./bot\njudge:\n  command: ./rules\n",
    )?;

    // Permissive by default: an empty judge answer is just an empty state.
    let output = referee(dir, &["initial.txt", "--max-turns", "1"])?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8(output.stdout)?, "MOVE1\n---\n\n---\n");

    let output = referee(dir, &["initial.txt", "--strict-exit-status"])?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("judge process exited with status 3"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_dry_run() -> Result<()> {
    let _guard = serial();
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();
    fs::write(dir.join("initial.txt"), "EMPTY")?;

    let output = referee(dir, &["initial.txt", "--dry-run", "--judge", "python3 judge.py"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Player: ./main"));
    assert!(stdout.contains("Judge: python3 judge.py"));
    assert!(stdout.contains("Max turns: unlimited"));
    Ok(())
}
