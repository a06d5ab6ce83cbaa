//! Probes for toolchains that leave a runtime signature in data sections:
//! Go, OCaml, DMD, Free Pascal, plus the structural TinyCC check.

use super::markers::*;
use super::scan::{lossy, scan_windows};
use crate::config::DetectionConfig;
use crate::image::BinaryImage;
use memchr::memmem;

/// `Go 1.21.3`, or `Go (unknown version)` when only `.gosymtab` gives it away.
pub(super) fn go(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    let version = scan_windows(image, RODATA, config, |window| {
        let m = RE_GO_VERSION.find(window.bytes())?;
        if window.in_tail_margin(m.start(), config.margin) {
            return None;
        }
        Some(lossy(&m.as_bytes()[2..]).into_owned())
    });
    match version {
        Some(version) => Some(format!("Go {version}")),
        None if image.has_section(GOSYMTAB) => Some(format!("Go {UNKNOWN_VERSION}")),
        None => None,
    }
}

/// `OCaml 4.05.0`
pub(super) fn ocaml(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    scan_windows(image, RODATA, config, |window| {
        let pos = memmem::find(window.bytes(), OCAML_MARKER)?;
        if window.in_tail_margin(pos, config.margin) {
            return None;
        }
        Some(match RE_DOTTED_VERSION.find(window.bytes()) {
            Some(m) => format!("OCaml {}", lossy(m.as_bytes())),
            None => format!("OCaml {UNKNOWN_VERSION}"),
        })
    })
}

/// `DMD`, from the druntime symbols in the dynamic string table.
pub(super) fn dmd(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    scan_windows(image, DYNSTR, config, |window| {
        let pos = memmem::find(window.bytes(), DMD_MARKER)?;
        (!window.in_tail_margin(pos, config.margin)).then(|| "DMD".to_string())
    })
}

/// `FPC 3.0.2`; the match already carries the compiler name.
pub(super) fn free_pascal(image: &dyn BinaryImage, config: &DetectionConfig) -> Option<String> {
    scan_windows(image, DATA, config, |window| {
        let m = RE_FPC_VERSION.find(window.bytes())?;
        let at_tail = !window.is_last() && m.end() == window.len();
        if at_tail || window.in_tail_margin(m.start(), config.margin) {
            return None;
        }
        Some(lossy(m.as_bytes()).into_owned())
    })
}

/// TinyCC leaves no version behind. Its binaries lack the ABI note that glibc
/// toolchains emit and carry a 4-byte constant pool section.
pub(super) fn tinycc(image: &dyn BinaryImage, _config: &DetectionConfig) -> Option<String> {
    if image.has_section(NOTE_ABI_TAG) || !image.has_section(RODATA_CST4) {
        return None;
    }
    Some("TCC".to_string())
}
