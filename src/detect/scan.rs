//! Section access shared by the probes.
//!
//! Read failures end the current probe quietly: another probe may not need
//! the failing section.

use crate::config::DetectionConfig;
use crate::image::BinaryImage;
use crate::stream::Window;
use std::borrow::Cow;
use tracing::debug;

/// Run `visit` over the full content of section `name`.
pub(crate) fn with_bytes<T>(
    image: &dyn BinaryImage,
    name: &str,
    visit: impl FnOnce(&[u8]) -> Option<T>,
) -> Option<T> {
    let section = image.section(name)?;
    match section.bytes() {
        Ok(data) => visit(data),
        Err(e) => {
            debug!(section = name, error = %e, "Skipping unreadable section");
            None
        }
    }
}

/// Run `visit` over overlapping windows of section `name` until it returns
/// `Some`.
pub(crate) fn scan_windows<T>(
    image: &dyn BinaryImage,
    name: &str,
    config: &DetectionConfig,
    mut visit: impl FnMut(&Window<'_>) -> Option<T>,
) -> Option<T> {
    let section = image.section(name)?;
    let mut reader = match section.windows(config.window_size) {
        Ok(reader) => reader,
        Err(e) => {
            debug!(section = name, error = %e, "Cannot stream section");
            return None;
        }
    };
    loop {
        match reader.next_window() {
            Ok(Some(window)) => {
                if let Some(found) = visit(&window) {
                    return Some(found);
                }
            }
            Ok(None) => return None,
            Err(e) => {
                debug!(section = name, error = %e, "Read failed while streaming section");
                return None;
            }
        }
    }
}

pub(crate) fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
