//! File-level entry points: open, parse, and examine an image on disk.

use crate::classify::{is_static, is_stripped};
use crate::config::DetectionConfig;
use crate::detect::identify;
use crate::error::Result;
use crate::image::{BinaryImage, ByteOrder, ImageFile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything cdetect can tell about one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Examination {
    pub path: PathBuf,
    pub compiler: String,
    /// Name of the probe that produced `compiler`, if any.
    pub probe: Option<&'static str>,
    pub stripped: bool,
    pub static_linked: bool,
    pub byte_order: ByteOrder,
    pub machine: u16,
}

/// Open `path`, parse it as ELF, and run detection plus classification.
pub fn examine<P: AsRef<Path>>(path: P, config: &DetectionConfig) -> Result<Examination> {
    let path = path.as_ref();
    let file = ImageFile::open(path, config.max_file_size)?;
    let image = file.parse()?;
    let detection = identify(&image, config);
    let examination = Examination {
        path: path.to_path_buf(),
        compiler: detection.label,
        probe: detection.probe,
        stripped: is_stripped(&image),
        static_linked: is_static(&image),
        byte_order: image.byte_order(),
        machine: image.machine(),
    };
    debug!(
        path = %path.display(),
        compiler = %examination.compiler,
        stripped = examination.stripped,
        static_linked = examination.static_linked,
        "Examined image"
    );
    Ok(examination)
}

/// Whether the ELF file at `path` is statically linked.
pub fn examine_static<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = ImageFile::open(path, DetectionConfig::default().max_file_size)?;
    Ok(is_static(&file.parse()?))
}

/// Whether the ELF file at `path` has no symbol table.
pub fn examine_stripped<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = ImageFile::open(path, DetectionConfig::default().max_file_size)?;
    Ok(is_stripped(&file.parse()?))
}
