//! Polling watch loop that regenerates the map when input files change.
//!
//! The loop scans the top level of the watched directory on a fixed
//! interval and triggers one regeneration whenever a strictly newer
//! modification time shows up. All change-tracking state lives in an
//! explicit [`WatchState`] value owned by the loop.
//!
//! Shutdown is cooperative: a termination signal only flips a shared
//! flag, which the loop checks between poll iterations and during the
//! sleep. A regeneration that is already underway always runs to
//! completion, so output files are never left half-written.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::{debug, error};

use crate::{ProtestMapError, Result};

/// Fixed delay between directory scans.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Granularity of the cancellation check during the poll sleep.
const CANCEL_SLICE: Duration = Duration::from_millis(250);

/// Change-tracking state of the watch loop.
///
/// `newest_seen` accumulates the largest modification time ever observed,
/// so deleting the newest file does not roll the clock back.
/// `last_generated` records the observation the output was last built
/// from; a strictly newer observation triggers exactly one regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchState {
    newest_seen: Option<SystemTime>,
    last_generated: Option<SystemTime>,
}

impl WatchState {
    /// Fresh state that has seen nothing and generated nothing. The first
    /// observation of a non-empty directory triggers a generation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one observed modification time into the state.
    pub fn observe(&mut self, mtime: SystemTime) {
        self.newest_seen = Some(match self.newest_seen {
            Some(seen) => seen.max(mtime),
            None => mtime,
        });
    }

    /// True when the newest observation has not been generated yet.
    pub fn needs_generation(&self) -> bool {
        match (self.newest_seen, self.last_generated) {
            (Some(seen), Some(done)) => seen > done,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Marks the newest observation as generated. Also called when a
    /// generation fails, so one bad input set is not retried every poll.
    pub fn mark_generated(&mut self) {
        self.last_generated = self.newest_seen;
    }
}

/// Largest modification time among the direct entries of `dir`.
///
/// Only the top level is scanned; a change inside a subdirectory counts
/// only if it also bumps the subdirectory's own modification time.
pub fn newest_mtime(dir: &Path) -> Result<Option<SystemTime>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ProtestMapError::IoError(format!(
            "Failed to read watch directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    let mut newest: Option<SystemTime> = None;
    for entry in entries {
        let entry = entry.map_err(|e| {
            ProtestMapError::IoError(format!(
                "Failed to read entry in {}: {}",
                dir.display(),
                e
            ))
        })?;
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| {
                ProtestMapError::IoError(format!(
                    "Failed to stat {}: {}",
                    entry.path().display(),
                    e
                ))
            })?;
        newest = Some(match newest {
            Some(seen) => seen.max(modified),
            None => modified,
        });
    }
    Ok(newest)
}

/// Shared cancellation flag, flipped by SIGINT or SIGTERM.
pub fn cancel_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)).map_err(|e| {
        ProtestMapError::IoError(format!("Failed to install termination handler: {}", e))
    })?;
    Ok(flag)
}

/// Runs the watch loop until the cancellation flag is set.
///
/// Each iteration scans the watched directory, runs `generate` if the
/// state calls for it, then sleeps for `interval`. Scan and generation
/// failures are logged and the loop keeps polling; only cancellation
/// ends it.
pub fn watch<F>(dir: &Path, interval: Duration, cancel: &AtomicBool, mut generate: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    let mut state = WatchState::new();
    loop {
        if cancel.load(Ordering::SeqCst) {
            println!("Shutting down.");
            return Ok(());
        }

        match newest_mtime(dir) {
            Ok(Some(mtime)) => state.observe(mtime),
            Ok(None) => debug!("Watch directory {} is empty", dir.display()),
            Err(e) => error!("Watch scan failed: {}", e),
        }

        if state.needs_generation() {
            println!("Change detected, generating new map...");
            match generate() {
                Ok(()) => {
                    println!("Map generation complete.");
                    println!("Watching for changes...");
                }
                Err(e) => error!("Map generation failed: {}", e),
            }
            state.mark_generated();
        }

        if interruptible_sleep(interval, cancel) {
            println!("Shutting down.");
            return Ok(());
        }
    }
}

/// Sleeps for `total`, waking periodically to check the flag. Returns
/// true if cancellation was requested.
fn interruptible_sleep(total: Duration, cancel: &AtomicBool) -> bool {
    let mut remaining = total;
    while remaining > Duration::ZERO {
        if cancel.load(Ordering::SeqCst) {
            return true;
        }
        let slice = remaining.min(CANCEL_SLICE);
        thread::sleep(slice);
        remaining -= slice;
    }
    cancel.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_fresh_state_does_not_trigger() {
        let state = WatchState::new();
        assert!(!state.needs_generation());
    }

    #[test]
    fn test_first_observation_triggers() {
        let mut state = WatchState::new();
        state.observe(at(100));
        assert!(state.needs_generation());
    }

    #[test]
    fn test_generation_consumes_the_trigger() {
        let mut state = WatchState::new();
        state.observe(at(100));
        state.mark_generated();
        assert!(!state.needs_generation());
    }

    #[test]
    fn test_strictly_newer_observation_triggers_again() {
        let mut state = WatchState::new();
        state.observe(at(100));
        state.mark_generated();
        state.observe(at(101));
        assert!(state.needs_generation());
    }

    #[test]
    fn test_equal_or_older_observation_does_not_retrigger() {
        let mut state = WatchState::new();
        state.observe(at(100));
        state.mark_generated();
        state.observe(at(100));
        assert!(!state.needs_generation());
        state.observe(at(50));
        assert!(!state.needs_generation());
    }

    #[test]
    fn test_newest_seen_never_rolls_back() {
        let mut state = WatchState::new();
        state.observe(at(100));
        state.observe(at(50));
        state.mark_generated();
        // A later scan that only sees the older file changes nothing.
        state.observe(at(50));
        assert!(!state.needs_generation());
    }

    #[test]
    fn test_newest_mtime_of_empty_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(newest_mtime(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_newest_mtime_sees_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("protests.csv"), "a").unwrap();
        fs::write(dir.path().join("nations.geojson"), "b").unwrap();
        assert!(newest_mtime(dir.path()).unwrap().is_some());
    }

    #[test]
    fn test_newest_mtime_missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = newest_mtime(&missing).unwrap_err();
        assert!(matches!(err, ProtestMapError::IoError(_)));
    }

    #[test]
    fn test_loop_generates_once_then_exits_on_cancel() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("protests.csv"), "x").unwrap();
        let cancel = AtomicBool::new(false);
        let mut runs = 0;
        watch(dir.path(), Duration::ZERO, &cancel, || {
            runs += 1;
            cancel.store(true, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_loop_swallows_generation_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("protests.csv"), "x").unwrap();
        let cancel = AtomicBool::new(false);
        let mut runs = 0;
        let result = watch(dir.path(), Duration::ZERO, &cancel, || {
            runs += 1;
            cancel.store(true, Ordering::SeqCst);
            Err(ProtestMapError::DataError("broken input".to_string()))
        });
        assert!(result.is_ok());
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_loop_survives_scan_failure() {
        let dir = tempfile::tempdir().unwrap();
        let watched = dir.path().join("data");
        fs::create_dir(&watched).unwrap();
        fs::write(watched.join("protests.csv"), "x").unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        let stopper = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            stopper.store(true, Ordering::SeqCst);
        });
        let mut runs = 0;
        // The first generation deletes the watched directory, so every
        // later scan fails. The loop must keep polling through those
        // failures until the flag stops it.
        watch(&watched, Duration::ZERO, &cancel, || {
            runs += 1;
            fs::remove_dir_all(&watched).unwrap();
            Ok(())
        })
        .unwrap();
        handle.join().unwrap();
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_preset_cancel_stops_before_generating() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("protests.csv"), "x").unwrap();
        let cancel = AtomicBool::new(true);
        let mut runs = 0;
        watch(dir.path(), Duration::from_secs(60), &cancel, || {
            runs += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, 0);
    }

    #[test]
    fn test_interruptible_sleep_returns_early_when_cancelled() {
        let cancel = AtomicBool::new(true);
        let start = std::time::Instant::now();
        assert!(interruptible_sleep(Duration::from_secs(30), &cancel));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_interruptible_sleep_completes_when_not_cancelled() {
        let cancel = AtomicBool::new(false);
        assert!(!interruptible_sleep(Duration::from_millis(1), &cancel));
    }
}
