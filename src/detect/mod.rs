//! Compiler detection chain.
//!
//! Each probe inspects one or more named sections for a compiler signature and
//! returns a label when it recognises one. Probes run in a fixed order and the
//! first label wins, so the order encodes priority: several probes rely on an
//! earlier probe having found nothing. The `.comment` section in particular is
//! shared by GHC, Clang, GCC, and Rust binaries linked through GCC.
//!
//! Detection never fails. Unreadable sections are treated as carrying no
//! signal, and an image that no probe recognises is labelled `unknown`.

pub mod markers;

mod comment;
mod runtime;
mod rust;
mod scan;

use crate::config::DetectionConfig;
use crate::image::BinaryImage;
use serde::Serialize;
use tracing::{debug, trace};

/// Label returned when no probe recognises the image.
pub const UNKNOWN: &str = "unknown";

/// Signature shared by every probe.
pub type ProbeFn = fn(&dyn BinaryImage, &DetectionConfig) -> Option<String>;

/// A named heuristic in the detection chain.
#[derive(Clone, Copy)]
pub struct Probe {
    pub name: &'static str,
    pub run: ProbeFn,
}

impl std::fmt::Debug for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probe").field("name", &self.name).finish()
    }
}

/// The chain, highest priority first.
pub const PROBES: [Probe; 9] = [
    Probe { name: "go", run: runtime::go },
    Probe { name: "ocaml", run: runtime::ocaml },
    Probe { name: "ghc", run: comment::ghc },
    Probe { name: "rust-unstripped", run: rust::rust_unstripped },
    Probe { name: "rust-stripped", run: rust::rust_stripped },
    Probe { name: "dmd", run: runtime::dmd },
    Probe { name: "gcc", run: comment::gcc },
    Probe { name: "fpc", run: runtime::free_pascal },
    Probe { name: "tcc", run: runtime::tinycc },
];

/// Outcome of the chain: the label and the probe that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub label: String,
    /// `None` when the label is [`UNKNOWN`].
    pub probe: Option<&'static str>,
}

impl Detection {
    fn unknown() -> Self {
        Self {
            label: UNKNOWN.to_string(),
            probe: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.probe.is_none()
    }
}

/// Run the chain and report which probe answered.
pub fn identify(image: &dyn BinaryImage, config: &DetectionConfig) -> Detection {
    for probe in &PROBES {
        trace!(probe = probe.name, "Running probe");
        if let Some(label) = (probe.run)(image, config).filter(|l| !l.is_empty()) {
            debug!(probe = probe.name, label = %label, "Compiler detected");
            return Detection {
                label,
                probe: Some(probe.name),
            };
        }
    }
    debug!("No probe recognised the image");
    Detection::unknown()
}

/// Best-effort compiler label for `image` with the default configuration.
pub fn detect_compiler(image: &dyn BinaryImage) -> String {
    detect_compiler_with(image, &DetectionConfig::default())
}

pub fn detect_compiler_with(image: &dyn BinaryImage, config: &DetectionConfig) -> String {
    identify(image, config).label
}
