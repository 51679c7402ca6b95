#![allow(dead_code)]

use sigbrowse_core::{Opener, ReconError, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Records every URL instead of launching anything.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub delay: Option<Duration>,
    pub fail_on: Option<String>,
}

impl RecordingOpener {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn failing_on(url: &str) -> Self {
        Self {
            fail_on: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail_on.as_deref() == Some(url) {
            return Err(ReconError::Launch {
                url: url.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"),
            });
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.opened.lock().unwrap().push(url.to_string());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
