//! Artifact layout
//!
//! An artifact is one `#!` line followed directly by zip archive bytes.

/// Concatenate the shebang line and the archive
pub fn compose(shebang: &[u8], archive: &[u8]) -> Vec<u8> {
    let mut artifact = Vec::with_capacity(shebang.len() + archive.len());
    artifact.extend_from_slice(shebang);
    artifact.extend_from_slice(archive);
    artifact
}

/// Split an artifact into its interpreter command and archive bytes.
///
/// Returns `None` unless the data starts with `#!` and the first line is
/// terminated by `\n`. The interpreter is returned without `#!` or the newline.
pub fn split_shebang(artifact: &[u8]) -> Option<(String, &[u8])> {
    if !artifact.starts_with(b"#!") {
        return None;
    }
    let newline = artifact.iter().position(|&b| b == b'\n')?;
    let interpreter = String::from_utf8_lossy(&artifact[2..newline])
        .trim()
        .to_string();
    Some((interpreter, &artifact[newline + 1..]))
}
