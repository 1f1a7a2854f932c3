//! Helpers for looking inside built artifacts.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

/// Split an artifact into its `#!` line and the zip entries behind it
pub fn read_artifact(bytes: &[u8]) -> (String, BTreeMap<String, Vec<u8>>) {
    assert!(bytes.starts_with(b"#!"), "artifact must start with #!");
    let newline = bytes
        .iter()
        .position(|&b| b == b'\n')
        .expect("shebang line must end with a newline");
    let shebang = String::from_utf8(bytes[..newline].to_vec()).expect("shebang is UTF-8");

    let mut archive =
        zip::ZipArchive::new(Cursor::new(&bytes[newline + 1..])).expect("zip after shebang");
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("zip entry");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("entry data");
        entries.insert(file.name().to_string(), data);
    }

    (shebang, entries)
}

#[cfg(unix)]
pub fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}
