//! Zip archiver
//!
//! Writes reproducible archives: every entry gets the zip epoch as its
//! timestamp and `0o644` permissions, so identical inputs give identical bytes.

use std::io::{Cursor, Read, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::domain::ports::Archiver;
use crate::error::PackResult;
use crate::models::{ArchiveEntry, Compression};

#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    fn options(compression: Compression) -> SimpleFileOptions {
        let method = match compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        };
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644)
    }
}

impl Archiver for ZipArchiver {
    fn encode(&self, entries: &[ArchiveEntry], compression: Compression) -> PackResult<Vec<u8>> {
        let options = Self::options(compression);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in entries {
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.data).map_err(ZipError::from)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    fn decode(&self, archive: &[u8]) -> PackResult<Vec<ArchiveEntry>> {
        let mut archive = ZipArchive::new(Cursor::new(archive))?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data).map_err(ZipError::from)?;
            entries.push(ArchiveEntry::new(name, data));
        }

        Ok(entries)
    }
}
