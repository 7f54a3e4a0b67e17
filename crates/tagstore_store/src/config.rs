//! Store configuration.

use std::path::{Path, PathBuf};

/// Configuration for a [`Store`](crate::Store).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the backing file.
    pub path: PathBuf,
    /// Whether every mutation is flushed immediately.
    pub auto_sync: bool,
    /// Whether each flush measures and logs its compression delta.
    pub report_compression: bool,
}

impl StoreConfig {
    /// Creates a configuration with auto-sync on and reporting off.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            auto_sync: true,
            report_compression: false,
        }
    }

    /// Builder method to enable/disable auto-sync.
    #[must_use]
    pub const fn with_auto_sync(mut self, enabled: bool) -> Self {
        self.auto_sync = enabled;
        self
    }

    /// Builder method to enable/disable compression reports.
    #[must_use]
    pub const fn with_report_compression(mut self, enabled: bool) -> Self {
        self.report_compression = enabled;
        self
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
