//! ELF images backed by the `object` crate over a read-only memory map.

use super::{BinaryImage, ByteOrder, Section, SegmentKind};
use crate::error::{Error, Result};
use memmap2::Mmap;
use object::read::elf::{ElfFile32, ElfFile64, FileHeader, ProgramHeader};
use object::{FileKind, Object, ObjectSection};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file mapped into memory, ready to be parsed as an image.
///
/// The file descriptor is closed as soon as the mapping exists; the mapping
/// itself is released when this value is dropped.
pub struct ImageFile {
    path: PathBuf,
    // None for empty files, which cannot be mapped.
    map: Option<Mmap>,
}

impl ImageFile {
    /// Map `path` read-only, refusing files larger than `max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, max_file_size: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        debug!(path = %path.display(), size, "Opening image");

        if size > max_file_size {
            warn!(
                path = %path.display(),
                size,
                limit = max_file_size,
                "File is too large"
            );
            return Err(Error::FileTooLarge {
                limit: max_file_size,
                found: size,
            });
        }

        let map = if size == 0 {
            None
        } else {
            // Safety: read-only map of a regular file; the image never writes through it.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    /// Parse the mapped bytes as an ELF image.
    pub fn parse(&self) -> Result<ElfImage<'_>> {
        ElfImage::parse_named(self.data(), &self.path)
    }
}

enum ElfKind<'data> {
    Elf32(ElfFile32<'data>),
    Elf64(ElfFile64<'data>),
}

/// A parsed 32- or 64-bit ELF file of either byte order.
pub struct ElfImage<'data> {
    file: ElfKind<'data>,
}

macro_rules! with_elf {
    ($image:expr, $f:ident => $body:expr) => {
        match &$image.file {
            ElfKind::Elf32($f) => $body,
            ElfKind::Elf64($f) => $body,
        }
    };
}

impl<'data> ElfImage<'data> {
    /// Parse an in-memory ELF file.
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        Self::parse_named(data, Path::new("<memory>"))
    }

    fn parse_named(data: &'data [u8], path: &Path) -> Result<Self> {
        let not_elf = || Error::NotAnElf {
            path: path.to_path_buf(),
        };
        let malformed = |e: object::read::Error| Error::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let file = match FileKind::parse(data).map_err(|_| not_elf())? {
            FileKind::Elf32 => ElfKind::Elf32(ElfFile32::parse(data).map_err(malformed)?),
            FileKind::Elf64 => ElfKind::Elf64(ElfFile64::parse(data).map_err(malformed)?),
            _ => return Err(not_elf()),
        };
        Ok(Self { file })
    }

    pub fn is_64(&self) -> bool {
        matches!(self.file, ElfKind::Elf64(_))
    }
}

impl BinaryImage for ElfImage<'_> {
    fn section(&self, name: &str) -> Option<Section<'_>> {
        with_elf!(self, f => {
            let section = f.section_by_name(name)?;
            Some(match section.uncompressed_data() {
                Ok(data) => Section::new(name, data),
                Err(e) => Section::unreadable(name, e.to_string()),
            })
        })
    }

    fn has_section(&self, name: &str) -> bool {
        with_elf!(self, f => f.section_by_name(name).is_some())
    }

    fn program_headers(&self) -> Vec<SegmentKind> {
        with_elf!(self, f => {
            let endian = f.endian();
            f.elf_program_headers()
                .iter()
                .map(|ph| SegmentKind::from_p_type(ph.p_type(endian)))
                .collect()
        })
    }

    fn has_symbol_table(&self) -> bool {
        with_elf!(self, f => f.symbol_table().is_some())
    }

    fn byte_order(&self) -> ByteOrder {
        let little = with_elf!(self, f => f.is_little_endian());
        if little {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    fn machine(&self) -> u16 {
        with_elf!(self, f => f.elf_header().e_machine(f.endian()))
    }
}
