//! Read-only view of a loaded object file.
//!
//! The detection chain only talks to [`BinaryImage`]. The container format is
//! parsed elsewhere: [`ElfImage`] adapts the `object` crate, [`MemoryImage`]
//! assembles an image from parts without any file at all.

pub mod elf;
pub mod memory;

pub use elf::{ElfImage, ImageFile};
pub use memory::MemoryImage;

use crate::error::{Error, Result};
use crate::stream::StreamReader;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Read;

/// Byte order of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Type tag of a program header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Load,
    Dynamic,
    Interp,
    Note,
    Other(u32),
}

impl SegmentKind {
    pub fn from_p_type(p_type: u32) -> Self {
        match p_type {
            object::elf::PT_LOAD => SegmentKind::Load,
            object::elf::PT_DYNAMIC => SegmentKind::Dynamic,
            object::elf::PT_INTERP => SegmentKind::Interp,
            object::elf::PT_NOTE => SegmentKind::Note,
            other => SegmentKind::Other(other),
        }
    }

    /// True for the entry that requests dynamic linking.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, SegmentKind::Dynamic)
    }
}

/// A named section of an image.
///
/// Content is available either in full through [`Section::bytes`] or as a
/// byte source for windowed scanning through [`Section::open_stream`]. A
/// section whose content could not be read still exists; the failure is
/// reported when the content is asked for.
#[derive(Debug, Clone)]
pub struct Section<'data> {
    name: String,
    content: std::result::Result<Cow<'data, [u8]>, String>,
}

impl<'data> Section<'data> {
    pub fn new(name: impl Into<String>, data: impl Into<Cow<'data, [u8]>>) -> Self {
        Self {
            name: name.into(),
            content: Ok(data.into()),
        }
    }

    /// A section that is present but whose content cannot be retrieved.
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Err(reason.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full content of the section.
    pub fn bytes(&self) -> Result<&[u8]> {
        match &self.content {
            Ok(data) => Ok(data),
            Err(reason) => Err(Error::SectionRead {
                section: self.name.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Byte source over the section content.
    pub fn open_stream(&self) -> Result<impl Read + '_> {
        self.bytes()
    }

    /// Overlapping windows of `window_size` bytes over the section content.
    pub fn windows(&self, window_size: usize) -> Result<StreamReader<impl Read + '_>> {
        StreamReader::new(self.open_stream()?, window_size)
    }
}

/// The narrow interface the detection chain needs from an object-file reader.
///
/// Implementations must be side-effect free: detection may be repeated on the
/// same image and run concurrently on different images.
pub trait BinaryImage {
    /// Look up a section by exact name.
    fn section(&self, name: &str) -> Option<Section<'_>>;

    /// Whether a section exists, without materialising it.
    fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Program header type tags, in file order.
    fn program_headers(&self) -> Vec<SegmentKind>;

    /// Whether a symbol table can be retrieved.
    fn has_symbol_table(&self) -> bool;

    fn byte_order(&self) -> ByteOrder;

    /// Raw machine architecture tag (`e_machine` for ELF).
    fn machine(&self) -> u16;
}
