//! Rust probes.
//!
//! With debug info, rustc records its own version in `.debug_str`. Without
//! it, only traces of the standard library paths or legacy allocator symbols
//! remain in `.rodata`, and the best available version is that of the C
//! toolchain that did the linking.

use super::comment::comment_stamp;
use super::markers::*;
use super::scan::{lossy, scan_windows};
use crate::config::DetectionConfig;
use crate::image::BinaryImage;
use memchr::{memchr, memmem};

/// `Rust 1.27.0`, `Rust 1.28.0-nightly`
pub(super) fn rust_unstripped(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    scan_windows(image, DEBUG_STR, config, |window| {
        let bytes = window.bytes();
        let pos = memmem::find(bytes, RUSTC_MARKER)?;
        if window.in_tail_margin(pos, config.margin) {
            return None;
        }
        let start = pos + RUSTC_MARKER.len();
        let end = start + memchr(b'(', &bytes[start..])?;
        let version = lossy(&bytes[start..end]);
        let version = version.trim();
        (!version.is_empty()).then(|| format!("Rust {version}"))
    })
}

/// `Rust (GCC 8.1.0)` or `Rust`
pub(super) fn rust_stripped(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    if !image.has_section(GCC_EXCEPT_TABLE) {
        return None;
    }

    let rustc_path = || {
        scan_windows(image, RODATA, config, |window| {
            let pos = memmem::find(window.bytes(), RUSTC_PATH_MARKER)?;
            (!window.in_tail_margin(pos, config.margin)).then_some(())
        })
    };
    // Older releases: "__rust_" symbol names stored as NUL-terminated strings.
    let legacy_symbol = || {
        scan_windows(image, RODATA, config, |window| {
            let bytes = window.bytes();
            memmem::find_iter(bytes, RUST_LEGACY_MARKER)
                .find(|&pos| {
                    pos > 0 && bytes[pos - 1] == 0 && !window.in_tail_margin(pos, config.margin)
                })
                .map(|_| ())
        })
    };
    rustc_path().or_else(legacy_symbol)?;

    let linker = comment_stamp(image).and_then(|stamp| stamp.versioned_label());
    Some(match linker {
        Some(linker) => format!("Rust ({linker})"),
        None => "Rust".to_string(),
    })
}
