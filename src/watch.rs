//! File system watcher for live content reload.
//!
//! Monitors the content and locale directories and reloads the site (content
//! index and translator) when they change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  content/  ─┐          │  │
//! │                                  │  locales/  ─┴► reload  │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Files are read lazily on each request, so body edits are visible without a
//! reload. A reload is still triggered for every change so that new, renamed
//! and deleted assets reach the index.

use crate::{content::AssetStore, log, site::Site};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path relative to root for log display.
///
/// `/proj/content/blog/en/launch.md` → `content/blog/en/launch.md`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing.
///
/// Reloads never write below the watched directories, so every event is kept,
/// including those that arrive right after a reload.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Reload the site for a batch of changes.
fn handle_changes<S: AssetStore>(paths: &[PathBuf], site: &Site<S>) {
    if paths.is_empty() {
        return;
    }

    let root = &site.config().root;
    let changed: Vec<_> = paths.iter().map(|p| rel_path(p, root)).collect();
    log!("watch"; "{} changed, reloading...", changed.join(", "));

    match site.reload() {
        Ok(assets) => log!("watch"; "indexed {assets} assets"),
        Err(err) => log!("watch"; "reload failed: {err:#}"),
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers<S: AssetStore>(watcher: &mut impl Watcher, site: &Site<S>) -> Result<()> {
    let config = site.config();
    let mut watched = Vec::new();

    for (name, path) in [("content", &config.content.root), ("locales", &config.content.locales)] {
        if path.is_dir() {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {name}: {}", path.display()))?;
            watched.push(format!("{}/", rel_path(path, &config.root)));
        }
    }

    if !watched.is_empty() {
        log!("watch"; "watching {}", watched.join(", "));
    }
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live reload.
pub fn watch_for_changes_blocking<S: AssetStore>(site: &Site<S>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, site)?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                handle_changes(&debouncer.take(), site);
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}
