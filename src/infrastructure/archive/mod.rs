//! Archive format implementations

mod zip_archiver;

pub use zip_archiver::ZipArchiver;
