//! Section names, fixed markers and precompiled version patterns used by the
//! probes.
//!
//! The patterns are byte regexes: section content is not guaranteed to be
//! UTF-8.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

// Sections
pub const RODATA: &str = ".rodata";
pub const DATA: &str = ".data";
pub const COMMENT: &str = ".comment";
pub const DEBUG_STR: &str = ".debug_str";
pub const DYNSTR: &str = ".dynstr";
pub const GOSYMTAB: &str = ".gosymtab";
pub const GCC_EXCEPT_TABLE: &str = ".gcc_except_table";
pub const NOTE_ABI_TAG: &str = ".note.ABI-tag";
pub const RODATA_CST4: &str = ".rodata.cst4";

// Markers
pub const GCC_MARKER: &[u8] = b"GCC: (";
pub const GNU_PREFIX: &[u8] = b"GNU) ";
pub const CLANG_MARKER: &[u8] = b"clang version";
pub const RUSTC_MARKER: &[u8] = b"rustc version";
pub const RUSTC_PATH_MARKER: &[u8] = b"/rustc-";
pub const RUST_LEGACY_MARKER: &[u8] = b"__rust_";
pub const GHC_MARKER: &[u8] = b"GHC ";
pub const OCAML_MARKER: &[u8] = b"[ocaml]";
pub const DMD_MARKER: &[u8] = b"__dmd_";

/// Suffix of every label whose compiler family is known but version is not.
pub const UNKNOWN_VERSION: &str = "(unknown version)";

/// `go1.21.3`, `go1.8`
pub static RE_GO_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"go(\d+\.)(\d+\.)?(\*|\d+)").expect("valid go version regex"));

/// `GHC 8.6.2`
pub static RE_GHC_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"GHC (\d{1,4}\.)(\d+\.)?(\d+)").expect("valid ghc version regex"));

/// `FPC 3.0.2`, the whole match is the label
pub static RE_FPC_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"FPC (\d+\.)?(\d+\.)?(\*|\d+)").expect("valid free pascal version regex")
});

/// Any dotted version; used for OCaml and for the text following `clang version`.
pub static RE_DOTTED_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.)(\d+\.)?(\*|\d+)").expect("valid dotted version regex"));

/// GCC version patterns, from the most anchored to the most permissive.
///
/// Each entry carries the number of leading anchor bytes to drop from the
/// match before it becomes a version.
pub static RE_GCC_VERSIONS: Lazy<[(Regex, usize); 4]> = Lazy::new(|| {
    [
        // ") 7.1.1 20170630"
        (
            Regex::new(r"\) (\d{1,4}\.)(\d+\.)?(\*|\d+) ").expect("valid gcc regex"),
            2,
        ),
        // " 7.2.0"
        (
            Regex::new(r" (\d{1,4}\.)(\d+\.)?(\*|\d+)").expect("valid gcc regex"),
            1,
        ),
        // "7.2.0"
        (
            Regex::new(r"(\d{1,4}\.)(\d+\.)?(\*|\d+)").expect("valid gcc regex"),
            0,
        ),
        // ") 4.8.5.1"
        (
            Regex::new(r"\) (\d{1,4}\.)(\d+\.)?(\*|\d+).(\d+)").expect("valid gcc regex"),
            2,
        ),
    ]
});
