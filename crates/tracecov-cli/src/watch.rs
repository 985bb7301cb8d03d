//! Record watching
//!
//! The tracer replaces the record file after each run, so the watcher
//! listens on the record's directory and lets [`RecordReloader`] decide,
//! by modification time, whether anything actually changed.

use crate::error::{CliError, CliResult};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracecov::{RecordFile, RecordReloader};

/// Whether `event` touches a file named like `record`
#[must_use]
pub fn is_record_event(event: &Event, record: &Path) -> bool {
    let Some(name) = record.file_name() else {
        return false;
    };
    event.paths.iter().any(|path| path.file_name() == Some(name))
}

/// Watches one record file and reloads it when it changes.
#[derive(Debug)]
pub struct RecordWatcher {
    reloader: RecordReloader,
    poll_interval: Duration,
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
}

impl RecordWatcher {
    /// Start watching `record`
    pub fn start(record: impl Into<PathBuf>, poll_interval: Duration) -> CliResult<Self> {
        let record = record.into();
        let dir = record
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                // Receiver may have dropped
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(poll_interval),
        )
        .map_err(|e| CliError::watch(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| CliError::watch(format!("failed to watch {}: {e}", dir.display())))?;

        tracing::info!(path = %record.display(), "watching coverage record");
        Ok(Self {
            reloader: RecordReloader::new(record),
            poll_interval,
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Path of the watched record
    #[must_use]
    pub fn path(&self) -> &Path {
        self.reloader.path()
    }

    /// The currently loaded record
    #[must_use]
    pub fn current(&self) -> Option<&RecordFile> {
        self.reloader.current()
    }

    /// Load the record if it changed since the last load.
    ///
    /// A record that does not exist yet is not an error: the tracer may not
    /// have run.
    pub fn refresh(&mut self) -> CliResult<bool> {
        match self.reloader.reload_if_changed() {
            Ok(changed) => Ok(changed),
            Err(tracecov::TracecovError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path().display(), "record not present yet");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Block until the record has been reloaded.
    ///
    /// Each poll interval without a matching event still checks the
    /// modification time, so missed events only delay a reload.
    pub fn wait_for_change(&mut self) -> CliResult<()> {
        loop {
            match self.receiver.recv_timeout(self.poll_interval) {
                Ok(Ok(event)) if !is_record_event(&event, self.reloader.path()) => continue,
                Ok(Ok(_)) | Err(RecvTimeoutError::Timeout) => {}
                Ok(Err(e)) => tracing::warn!(%e, "watch error"),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(CliError::watch("watcher stopped"));
                }
            }
            if self.refresh()? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use notify::EventKind;

    fn event_for(path: &str) -> Event {
        Event::new(EventKind::Any).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_record_event_matches_file_name() {
        let record = Path::new("/proj/.coverage.lines");
        assert!(is_record_event(&event_for("/proj/.coverage.lines"), record));
        assert!(!is_record_event(&event_for("/proj/other.txt"), record));
    }

    #[test]
    fn test_event_without_paths_is_ignored() {
        let event = Event::new(EventKind::Any);
        assert!(!is_record_event(&event, Path::new("r.lines")));
    }

    #[test]
    fn test_refresh_tolerates_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher =
            RecordWatcher::start(dir.path().join("r.lines"), Duration::from_millis(50)).unwrap();
        assert!(!watcher.refresh().unwrap());
        assert!(watcher.current().is_none());
    }

    #[test]
    fn test_refresh_loads_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.lines");
        std::fs::write(&path, "m.py\n[1]\n").unwrap();

        let mut watcher = RecordWatcher::start(&path, Duration::from_millis(50)).unwrap();
        assert!(watcher.refresh().unwrap());
        assert!(!watcher.refresh().unwrap());
        assert_eq!(watcher.current().unwrap().len(), 1);
    }

    #[test]
    fn test_wait_for_change_sees_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.lines");

        let mut watcher = RecordWatcher::start(&path, Duration::from_millis(20)).unwrap();
        assert!(!watcher.refresh().unwrap());

        std::fs::write(&path, "m.py\n[1, 2]\n").unwrap();
        watcher.wait_for_change().unwrap();
        assert_eq!(
            watcher.current().unwrap().lookup("m.py").unwrap().executed_lines,
            vec![1, 2]
        );
    }
}
