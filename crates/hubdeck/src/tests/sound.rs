#![cfg(unix)]

use crate::AppError;
use crate::notifier::{ExternalOutcome, run_external};

use std::path::Path;
use std::time::Duration;

/// WHAT: A well-behaved external player is waited for and reported as exited
/// WHY: The graceful path must not kill players that finish on time
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_fast_command_when_run_then_exits_within_grace() {
    // Given: A command that exits immediately
    // When: Running it with a generous grace period
    let outcome = run_external("true", Path::new("alert.wav"), Duration::from_secs(5))
        .await
        .unwrap();

    // Then: It exited on its own
    assert_eq!(outcome, ExternalOutcome::Exited);
}

/// WHAT: A hung external player is force-terminated after the grace period
/// WHY: A misbehaving command must not leak a child process
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_hung_command_when_grace_elapses_then_killed_and_reaped() {
    // Given: A command that sleeps far longer than the grace period
    let start = std::time::Instant::now();

    // When: Running it with a 50ms grace
    let outcome = run_external("sleep 60", Path::new("alert.wav"), Duration::from_millis(50))
        .await
        .unwrap();

    // Then: It was killed shortly after the grace elapsed, and the wait
    // that follows the kill reaped it (run_external returned at all).
    assert_eq!(outcome, ExternalOutcome::TimedOutKilled);
    assert!(start.elapsed() < Duration::from_secs(5));
}

/// WHAT: An empty command line is rejected before any spawn
/// WHY: There is nothing to execute; failing early beats a confusing spawn error
#[tokio::test]
async fn given_empty_command_when_run_then_sound_error() {
    // When: Running an empty command
    let result = run_external("", Path::new("alert.wav"), Duration::from_secs(1)).await;

    // Then: Rejected as a sound configuration error
    assert!(matches!(result, Err(AppError::SoundError { .. })));
}

/// WHAT: The sound path is passed as the command's final argument
/// WHY: The configured command line keeps its own arguments intact
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_command_with_args_when_run_then_spawns_with_path_appended() {
    // Given: A command whose own arguments must survive the split
    // When: Running `test -n <path>` (true because the path is non-empty)
    let outcome = run_external("test -n", Path::new("alert.wav"), Duration::from_secs(5))
        .await
        .unwrap();

    // Then: The command saw its argument and succeeded in time
    assert_eq!(outcome, ExternalOutcome::Exited);
}
