//! Structural classification of an image: stripped and statically linked.

use crate::image::BinaryImage;

/// An image is stripped when no symbol table can be retrieved from it.
pub fn is_stripped(image: &dyn BinaryImage) -> bool {
    !image.has_symbol_table()
}

/// An image is statically linked when none of its program headers requests
/// dynamic linking. Relocatable objects have no program headers and so count
/// as static.
pub fn is_static(image: &dyn BinaryImage) -> bool {
    !image.program_headers().iter().any(|kind| kind.is_dynamic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{MemoryImage, SegmentKind};

    #[test]
    fn test_stripped() {
        assert!(is_stripped(&MemoryImage::new()));
        assert!(!is_stripped(&MemoryImage::new().with_symbol_table()));
    }

    #[test]
    fn test_static() {
        let image = MemoryImage::new()
            .with_program_header(SegmentKind::Load)
            .with_program_header(SegmentKind::Note);
        assert!(is_static(&image));

        let image = image
            .with_program_header(SegmentKind::Interp)
            .with_program_header(SegmentKind::Dynamic);
        assert!(!is_static(&image));
    }

    #[test]
    fn test_no_program_headers_is_static() {
        assert!(is_static(&MemoryImage::new()));
    }
}
