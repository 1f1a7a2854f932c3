//! FileSystem port - abstraction over file I/O operations
//!
//! Use cases call these through a trait so the build and clean flows can be
//! exercised against a scratch directory or a fault-injecting wrapper.

use std::io;
use std::path::{Path, PathBuf};

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
pub trait FileSystem {
    /// Read a whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write a file, replacing any previous content
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Copy bytes from one file to another
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Rename within one file system (atomic replace of `to`)
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// True for regular files (and symlinks to them)
    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Absolute path with symlinks and `..` resolved; the path must exist
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Mark a file executable (`0o755` on Unix, no-op elsewhere)
    fn set_executable(&self, path: &Path) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a fresh uniquely-named directory under `parent`, starting with `prefix`
    fn create_temp_dir(&self, parent: &Path, prefix: &str) -> io::Result<PathBuf>;

    /// Immediate children of a directory
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}
