//! An image assembled from parts, for embedders that already hold section
//! content and for exercising the detection chain without real binaries.

use super::{BinaryImage, ByteOrder, Section, SegmentKind};

#[derive(Debug, Clone)]
enum Content {
    Bytes(Vec<u8>),
    Unreadable(String),
}

/// In-memory [`BinaryImage`] built with chained `with_*` calls.
///
/// ```
/// use cdetect::image::{MemoryImage, SegmentKind};
///
/// let image = MemoryImage::new()
///     .with_section(".comment", b"GCC: (GNU) 7.2.0\0".to_vec())
///     .with_program_header(SegmentKind::Load)
///     .with_symbol_table();
/// assert_eq!(cdetect::detect_compiler(&image), "GCC 7.2.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryImage {
    sections: Vec<(String, Content)>,
    program_headers: Vec<SegmentKind>,
    symbol_table: bool,
    byte_order: ByteOrder,
    machine: u16,
}

impl MemoryImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, replacing any earlier section of the same name.
    pub fn with_section(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name.into(), Content::Bytes(data.into()));
        self
    }

    /// Add a section whose content fails to read.
    pub fn with_unreadable_section(
        mut self,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.insert(name.into(), Content::Unreadable(reason.into()));
        self
    }

    pub fn with_program_header(mut self, kind: SegmentKind) -> Self {
        self.program_headers.push(kind);
        self
    }

    pub fn with_symbol_table(mut self) -> Self {
        self.symbol_table = true;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_machine(mut self, machine: u16) -> Self {
        self.machine = machine;
        self
    }

    fn insert(&mut self, name: String, content: Content) {
        match self.sections.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = content,
            None => self.sections.push((name, content)),
        }
    }
}

impl BinaryImage for MemoryImage {
    fn section(&self, name: &str) -> Option<Section<'_>> {
        let (name, content) = self.sections.iter().find(|(n, _)| n == name)?;
        Some(match content {
            Content::Bytes(data) => Section::new(name.as_str(), data.as_slice()),
            Content::Unreadable(reason) => Section::unreadable(name.as_str(), reason.as_str()),
        })
    }

    fn program_headers(&self) -> Vec<SegmentKind> {
        self.program_headers.clone()
    }

    fn has_symbol_table(&self) -> bool {
        self.symbol_table
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn machine(&self) -> u16 {
        self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup_is_exact() {
        let image = MemoryImage::new().with_section(".rodata.cst4", vec![0u8; 4]);
        assert!(image.has_section(".rodata.cst4"));
        assert!(!image.has_section(".rodata"));
    }

    #[test]
    fn test_later_section_replaces_earlier() {
        let image = MemoryImage::new()
            .with_section(".comment", b"old".to_vec())
            .with_section(".comment", b"new".to_vec());
        assert_eq!(image.section(".comment").unwrap().bytes().unwrap(), b"new");
    }

    #[test]
    fn test_attributes() {
        let image = MemoryImage::new()
            .with_byte_order(ByteOrder::Big)
            .with_machine(0x14)
            .with_program_header(SegmentKind::Dynamic);
        assert_eq!(image.byte_order(), ByteOrder::Big);
        assert_eq!(image.machine(), 0x14);
        assert_eq!(image.program_headers(), vec![SegmentKind::Dynamic]);
        assert!(!image.has_symbol_table());
    }
}
