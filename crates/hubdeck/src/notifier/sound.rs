//! Audible alert playback.
//!
//! Two players: the builtin one decodes and plays the sound file on a
//! blocking task, fire-and-forget; the external one spawns a user-supplied
//! command and reclaims it with a bounded wait-then-kill so a misbehaving
//! player can never leak a hung child. Neither path ever blocks the
//! consumer thread.

use crate::{AppError, AppResult};

use std::io::BufReader;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use error_location::ErrorLocation;
use rodio::{Decoder, OutputStream, Sink};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Grace period for an external player to finish on its own before it is
/// forcibly terminated. Long enough for any reasonable alert sound, short
/// enough that a wedged player cannot pile up children.
pub(crate) const EXTERNAL_PLAYER_TIMEOUT: Duration = Duration::from_secs(30);

/// How an external player run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExternalOutcome {
    /// The player exited on its own within the grace period.
    Exited,
    /// The player hung and was killed; the child is reaped.
    TimedOutKilled,
}

/// Map a category bit to its index into the sound list.
///
/// Categories are disjoint powers of two; a value with more than one bit
/// set, or zero, names no single slot and yields no sound. The caller
/// still bounds the returned index by the actual list length.
pub(crate) fn sound_slot(category: u32) -> Option<usize> {
    category
        .is_power_of_two()
        .then(|| category.trailing_zeros() as usize)
}

/// Play `path` with the builtin player on a blocking task.
///
/// Fire-and-forget: failures are logged, never surfaced.
pub(crate) fn play_builtin(path: PathBuf) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = decode_and_play(&path) {
            warn!(path = ?path, error = %e, "Builtin sound playback failed");
        }
    });
}

#[track_caller]
fn decode_and_play(path: &Path) -> AppResult<()> {
    let (_stream, handle) = OutputStream::try_default().map_err(|e| AppError::SoundError {
        reason: format!("No audio output available: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let sink = Sink::try_new(&handle).map_err(|e| AppError::SoundError {
        reason: format!("Failed to open sink: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let file = std::fs::File::open(path)?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| AppError::SoundError {
        reason: format!("Failed to decode {:?}: {}", path, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    sink.append(source);
    // The stream lives on this blocking task until playback finishes.
    sink.sleep_until_end();
    Ok(())
}

/// Spawn the external player for `path` and watch it from its own task.
///
/// The watcher, not the consumer thread, carries the bounded wait.
pub(crate) fn play_external(command: String, path: PathBuf) {
    tokio::spawn(async move {
        match run_external(&command, &path, EXTERNAL_PLAYER_TIMEOUT).await {
            Ok(ExternalOutcome::Exited) => {}
            Ok(ExternalOutcome::TimedOutKilled) => {
                warn!(command = %command, "External player timed out and was terminated");
            }
            Err(e) => warn!(command = %command, error = %e, "External player failed"),
        }
    });
}

/// Run `command` with `path` appended as its final argument, waiting at
/// most `grace` for it to exit before killing it.
///
/// The child handle is reaped exactly once: either by the graceful wait or
/// by the wait that follows the kill.
pub(crate) async fn run_external(
    command: &str,
    path: &Path,
    grace: Duration,
) -> AppResult<ExternalOutcome> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(AppError::SoundError {
            reason: "External player command is empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let mut child = Command::new(program)
        .args(parts)
        .arg(path)
        .kill_on_drop(true)
        .spawn()?;

    match timeout(grace, child.wait()).await {
        Ok(status) => {
            let status = status?;
            debug!(command = %command, code = ?status.code(), "External player exited");
            Ok(ExternalOutcome::Exited)
        }
        Err(_) => {
            // Force-terminate, then reap so no zombie survives.
            child.start_kill()?;
            let _ = child.wait().await;
            Ok(ExternalOutcome::TimedOutKilled)
        }
    }
}
