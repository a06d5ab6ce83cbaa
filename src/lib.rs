//! Identify the compiler, and where possible its version, that produced an
//! ELF executable.
//!
//! Detection runs an ordered chain of heuristics over named sections of the
//! image (see [`detect`]). Large sections are scanned through the overlapping
//! [`stream::StreamReader`] so that memory use is bounded by the window size.
//!
//! ```no_run
//! use cdetect::{examine, DetectionConfig};
//!
//! let report = examine("/usr/bin/ls", &DetectionConfig::default())?;
//! println!("{}: {}", report.path.display(), report.compiler);
//! # Ok::<(), cdetect::Error>(())
//! ```

pub mod api;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod image;
pub mod logging;
pub mod stream;
pub mod version;

pub use api::{examine, examine_static, examine_stripped, Examination};
pub use classify::{is_static, is_stripped};
pub use config::DetectionConfig;
pub use detect::{detect_compiler, detect_compiler_with, identify, Detection};
pub use error::{Error, Result};
pub use image::{BinaryImage, ElfImage, ImageFile, MemoryImage};
pub use version::first_is_greater;
