//! Depth-at-a-time directory enumeration
//!
//! One producer thread walks the tree down to a single depth with `walkdir`
//! and hands each directory found there to the consumer over a rendezvous
//! channel. The
//! consumer may rename directories while the producer is still running; it
//! stops the producer by cancelling (or simply dropping) the scan.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ObfuscateError, Result};
use crate::utils::file_utils::is_hidden;

/// Directories at exactly one depth below a root, produced lazily
pub struct LevelScan {
    depth: usize,
    receiver: Option<Receiver<Result<PathBuf>>>,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Start enumerating the directories `depth` levels below `root`
///
/// Depth 1 yields the immediate children of `root`.
pub fn scan_level(root: &Path, depth: usize) -> Result<LevelScan> {
    // Zero capacity: the producer never runs ahead of what the consumer has seen
    let (sender, receiver) = sync_channel::<Result<PathBuf>>(0);
    let cancelled = Arc::new(AtomicBool::new(false));

    let producer = LevelProducer {
        sender,
        cancelled: Arc::clone(&cancelled),
    };
    let start = root.to_path_buf();

    let handle = thread::Builder::new()
        .name(format!("package-scan-depth-{}", depth))
        .spawn(move || {
            producer.scan(&start, depth);
            debug!("Package scan at depth {} finished", depth);
        })
        .map_err(|e| ObfuscateError::scan(root, e))?;

    Ok(LevelScan {
        depth,
        receiver: Some(receiver),
        cancelled,
        handle: Some(handle),
    })
}

impl LevelScan {
    /// Tell the producer to stop recursing; already-queued results are discarded
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Iterator for LevelScan {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cancelled.load(Ordering::SeqCst) {
            return None;
        }
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for LevelScan {
    fn drop(&mut self) {
        self.cancel();
        // Dropping the receiver unblocks a producer parked in `send`
        self.receiver.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Package scan thread at depth {} panicked", self.depth);
            }
        }
    }
}

struct LevelProducer {
    sender: SyncSender<Result<PathBuf>>,
    cancelled: Arc<AtomicBool>,
}

impl LevelProducer {
    /// Send every visible directory exactly `depth` levels below `root`
    fn scan(&self, root: &Path, depth: usize) {
        let walker = WalkDir::new(root)
            .min_depth(depth)
            .max_depth(depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || (entry.file_type().is_dir() && !is_hidden(entry.path()))
            });

        for entry in walker {
            if self.cancelled.load(Ordering::SeqCst) {
                return;
            }
            let message = entry
                .map(|entry| entry.into_path())
                .map_err(|e| ObfuscateError::walk(root, e));
            let failed = message.is_err();
            // A closed channel means the consumer is gone
            if self.sender.send(message).is_err() || failed {
                return;
            }
        }
    }
}
