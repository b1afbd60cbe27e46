use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::warn;

use super::error::ImportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Turns upload bytes into text.
///
/// UTF-8 (with or without BOM) is taken as is. Anything else is decoded as
/// Windows-1252, which is what older Excel installs save "CSV" as.
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>, ImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    warn!("input is not valid UTF-8, decoding as Windows-1252");
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ImportError::Encoding);
    }
    Ok(text)
}

/// A quiz sheet mapped read-only from disk.
pub struct SheetLoader {
    /// `None` for an empty file, which cannot be mapped.
    mmap: Option<Mmap>,
}

impl SheetLoader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat file: {:?}", path))?
            .len();
        if len == 0 {
            return Ok(Self { mmap: None });
        }
        // Safety: the sheet is only read, and only for the duration of one import.
        let mmap = unsafe { Mmap::map(&file).context("Failed to memory map file")? };
        Ok(Self { mmap: Some(mmap) })
    }

    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    pub fn text(&self) -> Result<Cow<'_, str>> {
        decode_text(self.bytes()).context("Failed to decode sheet")
    }
}
