//! Configuration for the detection chain.
//!
//! The window size and tail margin are empirical tuning parameters of the
//! windowed probes. The defaults comfortably exceed the longest marker plus
//! version string any probe looks for.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default window size for streamed sections (8 KiB).
pub const DEFAULT_WINDOW_SIZE: usize = 8192;
/// Default tail margin inside a window (1 KiB).
pub const DEFAULT_MARGIN: usize = 1024;
/// Default upper bound on the size of an image that will be opened (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Settings shared by every probe in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Size of each streamed window in bytes; must be even.
    pub window_size: usize,
    /// Matches starting this close to the end of a full window are deferred
    /// to the next window.
    pub margin: usize,
    /// Files larger than this are refused before mapping.
    pub max_file_size: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            margin: DEFAULT_MARGIN,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DetectionConfig {
    /// Check the invariants the windowed scanner relies on.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size % 2 != 0 {
            return Err(Error::InvalidWindowSize(self.window_size));
        }
        if self.margin > self.window_size / 2 {
            return Err(Error::InvalidConfig(format!(
                "margin {} exceeds half the window size {}",
                self.margin, self.window_size
            )));
        }
        Ok(())
    }

    /// Load a (possibly partial) JSON configuration and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}
