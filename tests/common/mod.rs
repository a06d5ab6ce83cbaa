//! Shared fixtures for the integration tests.
//!
//! Real compiler output is not checked in. ELF files are synthesised with the
//! `object` writer instead, carrying exactly the sections a probe looks at.

#![allow(dead_code)]

use object::write::Object;
use object::{Architecture, BinaryFormat, Endianness, SectionKind};
use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
///
/// The file is removed when the returned `NamedTempFile` is dropped.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// A relocatable x86-64 ELF object with the given named sections.
pub fn elf_with_sections(sections: &[(&str, &[u8])]) -> Vec<u8> {
    elf_for(Architecture::X86_64, Endianness::Little, sections)
}

pub fn elf_for(
    arch: Architecture,
    endian: Endianness,
    sections: &[(&str, &[u8])],
) -> Vec<u8> {
    let mut obj = Object::new(BinaryFormat::Elf, arch, endian);
    for (name, data) in sections {
        let kind = if *name == ".comment" {
            SectionKind::OtherString
        } else {
            SectionKind::ReadOnlyData
        };
        let id = obj.add_section(Vec::new(), name.as_bytes().to_vec(), kind);
        obj.append_section_data(id, data, 1);
    }
    obj.write().unwrap()
}

/// Write an ELF object with the given sections to a temporary file.
pub fn elf_file(sections: &[(&str, &[u8])]) -> NamedTempFile {
    create_temp_file(&elf_with_sections(sections))
}

/// Section content for the compiler signatures exercised across tests.
pub mod stamps {
    pub const GCC_7_2_0: &[u8] = b"GCC: (GNU) 7.2.0\0";
    pub const GCC_7_1_1: &[u8] = b"GCC: (GNU) 7.1.1 20170630\0";
    pub const GCC_8_1_0: &[u8] = b"GCC: (GNU) 8.1.0\0";
    pub const GCC_TWO_STAMPS: &[u8] = b"GCC: (GNU) 6.3.0\0GCC: (GNU) 7.2.0\0";
    pub const CLANG_6_0_0: &[u8] =
        b"GCC: (GNU) 7.3.0\0clang version 6.0.0-1ubuntu2 (tags/RELEASE_600/final)\0";
    pub const RUSTC_1_27_0: &[u8] =
        b"clang LLVM (rustc version 1.27.0 (3eda71b00 2018-06-19))\0";
    pub const RUSTC_NIGHTLY: &[u8] =
        b"clang LLVM (rustc version 1.28.0-nightly (29f48ccf3 2018-06-03))\0";
    pub const RUST_STD_PATH: &[u8] = b"\0/rustc-1.27.0/src/libcore/fmt/mod.rs\0";
}
