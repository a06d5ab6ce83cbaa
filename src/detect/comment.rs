//! Probes over the `.comment` section: GHC, and GCC/Clang.
//!
//! The comment section collects one stamp per toolchain that contributed an
//! object file, so a binary linked from mixed objects can carry several
//! `GCC: (...)` stamps, or a GCC stamp next to a Clang one.

use super::markers::*;
use super::scan::{lossy, with_bytes};
use crate::config::DetectionConfig;
use crate::image::BinaryImage;
use crate::version::first_is_greater;
use memchr::memmem;

/// What the comment section says about the C toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommentStamp {
    Gcc(Option<String>),
    Clang(Option<String>),
    /// No GCC marker at all; the section text as found.
    Raw(String),
}

impl CommentStamp {
    pub(crate) fn label(&self) -> String {
        match self {
            CommentStamp::Gcc(version) => versioned("GCC", version.as_deref()),
            CommentStamp::Clang(version) => versioned("Clang", version.as_deref()),
            CommentStamp::Raw(text) => text.clone(),
        }
    }

    /// The label, but only when a GCC or Clang version was recovered.
    pub(crate) fn versioned_label(&self) -> Option<String> {
        match self {
            CommentStamp::Gcc(Some(_)) | CommentStamp::Clang(Some(_)) => Some(self.label()),
            _ => None,
        }
    }
}

fn versioned(family: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{family} {v}"),
        None => format!("{family} {UNKNOWN_VERSION}"),
    }
}

pub(crate) fn comment_stamp(image: &dyn BinaryImage) -> Option<CommentStamp> {
    with_bytes(image, COMMENT, parse_comment)
}

pub(crate) fn parse_comment(data: &[u8]) -> Option<CommentStamp> {
    if memmem::find(data, GCC_MARKER).is_none() {
        let text = lossy(data);
        let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        return (!text.is_empty()).then(|| CommentStamp::Raw(text.to_string()));
    }

    if let Some(pos) = memmem::find(data, CLANG_MARKER) {
        let rest = &data[pos + CLANG_MARKER.len()..];
        let version = RE_DOTTED_VERSION
            .find(rest)
            .map(|m| lossy(m.as_bytes()).into_owned());
        return Some(CommentStamp::Clang(version));
    }

    Some(CommentStamp::Gcc(gcc_version(newest_gcc_stamp(data))))
}

/// With two or more GCC stamps, keep the fragment carrying the greater
/// version out of the first two.
fn newest_gcc_stamp(data: &[u8]) -> &[u8] {
    let mut hits = memmem::find_iter(data, GCC_MARKER);
    let (Some(first), Some(second)) = (hits.next(), hits.next()) else {
        return data;
    };
    let a = strip_gnu(&data[first + GCC_MARKER.len()..second]);
    let b = strip_gnu(&data[second + GCC_MARKER.len()..]);
    if first_is_greater(&lossy(a), &lossy(b)) {
        a
    } else {
        b
    }
}

fn strip_gnu(fragment: &[u8]) -> &[u8] {
    fragment.strip_prefix(GNU_PREFIX).unwrap_or(fragment)
}

/// First version produced by the GCC patterns, in order, that survives the
/// false-positive guards: no `1.` prefix (a stray `-1` artifact) and not `0`.
fn gcc_version(active: &[u8]) -> Option<String> {
    RE_GCC_VERSIONS.iter().find_map(|(re, skip)| {
        let m = re.find(active)?;
        let version = lossy(&m.as_bytes()[*skip..]).trim().to_string();
        let plausible = !version.is_empty() && !version.starts_with("1.") && version != "0";
        plausible.then_some(version)
    })
}

/// `GHC 8.6.2`
pub(super) fn ghc(image: &dyn BinaryImage, _config: &DetectionConfig) -> Option<String> {
    with_bytes(image, COMMENT, |data| {
        memmem::find(data, GHC_MARKER)?;
        let m = RE_GHC_VERSION.find(data)?;
        let version = lossy(&m.as_bytes()[GHC_MARKER.len()..]).trim().to_string();
        Some(format!("GHC {version}"))
    })
}

/// `GCC 7.2.0`, `Clang 6.0.0`, or the raw comment text.
pub(super) fn gcc(image: &dyn BinaryImage, _config: &DetectionConfig) -> Option<String> {
    comment_stamp(image).map(|stamp| stamp.label())
}
