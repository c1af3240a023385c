use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use spotless_applier_core::config::DiscoveryConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::ProjectArgs;
use crate::host::{ConsoleNotifier, FlagSelector, ProjectContext};

/// Saves landing this soon after a reformat finished are the formatter's own
/// writes.
const COOLDOWN: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileState {
    /// A reformat is running; `dirty` records a save seen meanwhile
    Running { dirty: bool },
    Finished(Instant),
}

/// Per-file reformat bookkeeping for the watcher.
#[derive(Debug, Default)]
pub struct SaveTracker {
    files: HashMap<PathBuf, FileState>,
}

impl SaveTracker {
    /// Claim `path` for a new reformat.
    ///
    /// Fails while one is in flight, in which case the save is remembered
    /// for a single follow-up run, or while the last run is cooling down.
    pub fn try_start(&mut self, path: &Path, now: Instant) -> bool {
        self.prune(now);

        match self.files.get_mut(path) {
            Some(FileState::Running { dirty }) => {
                *dirty = true;
                false
            }
            Some(FileState::Finished(finished)) if now.duration_since(*finished) < COOLDOWN => false,
            _ => {
                self.files
                    .insert(path.to_path_buf(), FileState::Running { dirty: false });
                true
            }
        }
    }

    /// Mark the run for `path` done. Returns `true` when the file was saved
    /// during the run; it then stays claimed for the follow-up run.
    pub fn finish(&mut self, path: &Path, now: Instant) -> bool {
        if let Some(FileState::Running { dirty: true }) = self.files.get(path) {
            self.files
                .insert(path.to_path_buf(), FileState::Running { dirty: false });
            return true;
        }
        self.files.insert(path.to_path_buf(), FileState::Finished(now));
        false
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn prune(&mut self, now: Instant) {
        self.files.retain(|_, state| match state {
            FileState::Running { .. } => true,
            FileState::Finished(finished) => now.duration_since(*finished) < COOLDOWN,
        });
    }
}

pub async fn watch_command(args: &ProjectArgs) -> Result<()> {
    let project = ProjectContext::load(args)?;
    let applier = project.applier(
        Arc::new(ConsoleNotifier::new()),
        Box::new(FlagSelector::default()),
    );

    let (tx, mut rx) = mpsc::channel::<notify::Result<Event>>(256);
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.blocking_send(res);
    })
    .context("Failed to create file watcher")?;
    watcher
        .watch(&project.root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", project.root.display()))?;

    println!("👀 Watching {} (Ctrl-C to stop)", project.root.display());

    let tracker = Arc::new(Mutex::new(SaveTracker::default()));
    // Files saved again while their reformat was running
    let (rerun_tx, mut rerun_rx) = mpsc::unbounded_channel::<PathBuf>();

    loop {
        let paths = tokio::select! {
            Some(res) = rx.recv() => match res {
                Ok(event) if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
                    event
                        .paths
                        .into_iter()
                        .filter(|path| is_watched_file(&project.root, path, &project.config.discovery))
                        .filter(|path| {
                            let claimed = tracker
                                .lock()
                                .map(|mut t| t.try_start(path, Instant::now()))
                                .unwrap_or(false);
                            if !claimed {
                                debug!("Deferring {}: reformat in progress or just finished", path.display());
                            }
                            claimed
                        })
                        .collect::<Vec<_>>()
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!("Watch error: {}", e);
                    continue;
                }
            },
            Some(path) = rerun_rx.recv() => {
                debug!("Reformatting {} again after a save during the last run", path.display());
                vec![path]
            }
            else => break,
        };

        for path in paths {
            let handles = applier.run(Some(path.clone()));
            let tracker = Arc::clone(&tracker);
            let rerun_tx = rerun_tx.clone();
            tokio::spawn(async move {
                for handle in handles {
                    handle.wait().await;
                }
                let again = tracker
                    .lock()
                    .map(|mut t| t.finish(&path, Instant::now()))
                    .unwrap_or(false);
                if again {
                    let _ = rerun_tx.send(path);
                }
            });
        }
    }

    Ok(())
}

/// Regular files under `root` outside excluded and hidden directories.
fn is_watched_file(root: &Path, path: &Path, discovery: &DiscoveryConfig) -> bool {
    if !path.is_file() {
        return false;
    }
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .all(|name| !discovery.is_excluded(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tracker_blocks_in_flight_and_cooldown() {
        let mut tracker = SaveTracker::default();
        let path = Path::new("/ws/Foo.java");
        let start = Instant::now();

        assert!(tracker.try_start(path, start));
        assert!(!tracker.finish(path, start));
        assert!(!tracker.try_start(path, start + Duration::from_millis(500)));
        assert!(tracker.try_start(path, start + COOLDOWN + Duration::from_millis(1)));
    }

    #[test]
    fn test_save_during_run_triggers_one_follow_up() {
        let mut tracker = SaveTracker::default();
        let path = Path::new("/ws/Foo.java");
        let start = Instant::now();

        assert!(tracker.try_start(path, start));
        assert!(!tracker.try_start(path, start));
        assert!(!tracker.try_start(path, start));

        // Still claimed for the follow-up run
        assert!(tracker.finish(path, start));
        assert!(!tracker.try_start(path, start));

        assert!(tracker.finish(path, start));
        assert!(!tracker.finish(path, start + Duration::from_millis(10)));
    }

    #[test]
    fn test_tracker_is_per_file() {
        let mut tracker = SaveTracker::default();
        let now = Instant::now();
        assert!(tracker.try_start(Path::new("/ws/A.java"), now));
        assert!(tracker.try_start(Path::new("/ws/B.java"), now));
    }

    #[test]
    fn test_finished_entries_are_pruned() {
        let mut tracker = SaveTracker::default();
        let start = Instant::now();
        for name in ["A", "B", "C"] {
            let path = PathBuf::from(format!("/ws/{name}.java"));
            assert!(tracker.try_start(&path, start));
            tracker.finish(&path, start);
        }
        assert_eq!(tracker.len(), 3);

        let later = start + COOLDOWN + Duration::from_secs(1);
        assert!(tracker.try_start(Path::new("/ws/D.java"), later));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_is_watched_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("src/Foo.java"), "").unwrap();
        fs::write(root.join("build/Gen.java"), "").unwrap();
        fs::write(root.join(".git/HEAD"), "").unwrap();

        let discovery = DiscoveryConfig::default();
        assert!(is_watched_file(root, &root.join("src/Foo.java"), &discovery));
        assert!(!is_watched_file(root, &root.join("build/Gen.java"), &discovery));
        assert!(!is_watched_file(root, &root.join(".git/HEAD"), &discovery));
        assert!(!is_watched_file(root, &root.join("src"), &discovery));
    }
}
