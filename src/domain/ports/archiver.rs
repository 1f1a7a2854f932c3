//! Archiver port - turns entries into archive bytes and back

use crate::error::PackResult;
use crate::models::{ArchiveEntry, Compression};

pub trait Archiver {
    /// Serialize entries in order into a fresh archive
    fn encode(&self, entries: &[ArchiveEntry], compression: Compression) -> PackResult<Vec<u8>>;

    /// Read every entry back, in archive order
    fn decode(&self, archive: &[u8]) -> PackResult<Vec<ArchiveEntry>>;
}
