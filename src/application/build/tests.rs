use std::io;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::domain::ports::build_events::recording::RecordingEventSink;
use crate::domain::ports::{Archiver, BuildEvent, FileSystem, NoopEventSink};
use crate::domain::services::split_shebang;
use crate::error::{PackError, Step};
use crate::infrastructure::{LocalFs, ZipArchiver};
use crate::models::{App, STAGING_PREFIX};

const KAWPOW: &[u8] = b"#!/usr/bin/python3\nfrom MinerAPI import KawpowMiner\nprint('stats')\n";
const MINER_API: &[u8] = b"class KawpowMiner:\n    pass\n";

fn project() -> (tempfile::TempDir, App) {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("kawpowstats.py"), KAWPOW).unwrap();
    std::fs::write(dir.path().join("MinerAPI.py"), MINER_API).unwrap();
    let app = App::new(
        dir.path().join("kawpowstats.py"),
        vec![dir.path().join("MinerAPI.py")],
    );
    (dir, app)
}

fn use_case() -> BuildUseCase<LocalFs, ZipArchiver> {
    BuildUseCase::new(LocalFs::new(), ZipArchiver::new())
}

fn staging_dirs(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(STAGING_PREFIX)
        })
        .collect()
}

/// Wraps LocalFs and fails chosen operations
struct FailingFs {
    inner: LocalFs,
    fail_chmod: bool,
    fail_rename: bool,
}

impl FileSystem for FailingFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.inner.read(path)
    }
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        self.inner.write(path, content)
    }
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.inner.copy(from, to)
    }
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.fail_rename {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.inner.rename(from, to)
    }
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonicalize(path)
    }
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        if self.fail_chmod {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "no chmod"));
        }
        self.inner.set_executable(path)
    }
    fn remove(&self, path: &Path) -> io::Result<()> {
        self.inner.remove(path)
    }
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_dir_all(path)
    }
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path)
    }
    fn create_temp_dir(&self, parent: &Path, prefix: &str) -> io::Result<PathBuf> {
        self.inner.create_temp_dir(parent, prefix)
    }
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list_dir(path)
    }
}

#[test]
fn build_writes_shebang_and_archive() {
    let (dir, app) = project();

    let report = use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let artifact = std::fs::read(dir.path().join("kawpowstats")).unwrap();
    assert!(artifact.starts_with(b"#!/usr/bin/env python3\n"));

    let (interpreter, archive) = split_shebang(&artifact).unwrap();
    assert_eq!(interpreter, "/usr/bin/env python3");

    let entries = ZipArchiver::new().decode(archive).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "__main__.py");
    assert_eq!(entries[0].data, KAWPOW);
    assert_eq!(entries[1].name, "MinerAPI.py");
    assert_eq!(entries[1].data, MINER_API);

    assert_eq!(report.app, "kawpowstats");
    assert_eq!(report.size, artifact.len() as u64);
    assert_eq!(report.source_bytes(), (KAWPOW.len() + MINER_API.len()) as u64);
    assert!(report.hash.unwrap().as_str().starts_with("sha256:"));
}

#[cfg(unix)]
#[test]
fn build_marks_artifact_executable() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, app) = project();
    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let mode = std::fs::metadata(dir.path().join("kawpowstats"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111, "artifact should be executable");
}

#[test]
fn build_keeps_sources_and_removes_intermediates() {
    let (dir, app) = project();
    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    assert_eq!(std::fs::read(dir.path().join("kawpowstats.py")).unwrap(), KAWPOW);
    assert!(!dir.path().join("__main__.py").exists());
    assert!(!dir.path().join("kawpowstats.zip").exists());
    assert!(staging_dirs(dir.path()).is_empty());
}

#[test]
fn build_without_modules_has_only_main() {
    let (dir, app) = project();
    let app = App::new(app.entry, vec![]);

    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let artifact = std::fs::read(dir.path().join("kawpowstats")).unwrap();
    let (_, archive) = split_shebang(&artifact).unwrap();
    let entries = ZipArchiver::new().decode(archive).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "__main__.py");
}

#[test]
fn build_twice_is_byte_identical() {
    let (dir, app) = project();
    let uc = use_case();

    uc.execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();
    let first = std::fs::read(dir.path().join("kawpowstats")).unwrap();

    uc.execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();
    let second = std::fs::read(dir.path().join("kawpowstats")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn build_replaces_stale_artifact() {
    let (dir, app) = project();
    std::fs::write(dir.path().join("kawpowstats"), b"stale junk").unwrap();

    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let artifact = std::fs::read(dir.path().join("kawpowstats")).unwrap();
    assert!(artifact.starts_with(b"#!"));
    assert!(!artifact.windows(10).any(|w| w == b"stale junk"));
}

#[test]
fn build_missing_entry_fails_without_artifact() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().join("kawpowstats.py"), vec![]);

    let err = use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap_err();

    assert!(err.is_missing_source(), "unexpected error: {err}");
    assert!(!dir.path().join("kawpowstats").exists());
    assert!(staging_dirs(dir.path()).is_empty());
}

#[test]
fn build_missing_module_names_the_module() {
    let (dir, app) = project();
    let missing = dir.path().join("Miners.py");
    let app = App::new(app.entry, vec![missing.clone()]);

    match use_case().execute(&app, &BuildOptions::new(), &NoopEventSink) {
        Err(PackError::MissingSource { path }) => assert_eq!(path, missing),
        other => panic!("expected MissingSource, got {:?}", other),
    }
    assert!(!dir.path().join("kawpowstats").exists());
}

#[test]
fn build_rejects_output_over_source() {
    let (_dir, app) = project();
    let app = app.clone().with_output(app.modules[0].clone());

    assert!(matches!(
        use_case().execute(&app, &BuildOptions::new(), &NoopEventSink),
        Err(PackError::OutputIsSource { .. })
    ));
}

#[test]
fn build_rejects_output_reaching_source_through_parent_dir() {
    let (dir, app) = project();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let app = app.with_output(dir.path().join("sub/../kawpowstats.py"));

    assert!(matches!(
        use_case().execute(&app, &BuildOptions::new(), &NoopEventSink),
        Err(PackError::OutputIsSource { .. })
    ));
    assert_eq!(
        std::fs::read(dir.path().join("kawpowstats.py")).unwrap(),
        KAWPOW
    );
    assert!(staging_dirs(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn build_rejects_output_symlinked_to_source() {
    let (dir, app) = project();
    let link = dir.path().join("miner-link");
    std::os::unix::fs::symlink(dir.path().join("MinerAPI.py"), &link).unwrap();
    let app = app.with_output(link.clone());

    assert!(matches!(
        use_case().execute(&app, &BuildOptions::new().with_dry_run(true), &NoopEventSink),
        Err(PackError::OutputIsSource { .. })
    ));
    assert!(matches!(
        use_case().execute(&app, &BuildOptions::new(), &NoopEventSink),
        Err(PackError::OutputIsSource { .. })
    ));
    assert_eq!(
        std::fs::read(dir.path().join("MinerAPI.py")).unwrap(),
        MINER_API
    );
    assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
}

#[test]
fn build_accepts_existing_unrelated_output() {
    let (dir, app) = project();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("kawpowstats"), b"previous").unwrap();
    let app = app.with_output(dir.path().join("sub/../kawpowstats"));

    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let artifact = std::fs::read(dir.path().join("kawpowstats")).unwrap();
    assert!(artifact.starts_with(b"#!/usr/bin/env python3\n"));
}

#[test]
fn failed_chmod_leaves_previous_artifact() {
    let (dir, app) = project();
    std::fs::write(dir.path().join("kawpowstats"), b"previous").unwrap();

    let uc = BuildUseCase::new(
        FailingFs {
            inner: LocalFs::new(),
            fail_chmod: true,
            fail_rename: false,
        },
        ZipArchiver::new(),
    );

    match uc.execute(&app, &BuildOptions::new(), &NoopEventSink) {
        Err(PackError::Io { step, .. }) => assert_eq!(step, Step::SetPermissions),
        other => panic!("expected Io error, got {:?}", other),
    }
    assert_eq!(
        std::fs::read(dir.path().join("kawpowstats")).unwrap(),
        b"previous"
    );
    assert!(staging_dirs(dir.path()).is_empty());
}

#[test]
fn failed_rename_leaves_no_artifact() {
    let (dir, app) = project();

    let uc = BuildUseCase::new(
        FailingFs {
            inner: LocalFs::new(),
            fail_chmod: false,
            fail_rename: true,
        },
        ZipArchiver::new(),
    );

    match uc.execute(&app, &BuildOptions::new(), &NoopEventSink) {
        Err(PackError::Io { step, path, .. }) => {
            assert_eq!(step, Step::WriteArtifact);
            assert_eq!(path, dir.path().join("kawpowstats"));
        }
        other => panic!("expected Io error, got {:?}", other),
    }
    assert!(!dir.path().join("kawpowstats").exists());
    assert!(staging_dirs(dir.path()).is_empty());
}

#[test]
fn dry_run_writes_nothing() {
    let (dir, app) = project();

    let report = use_case()
        .execute(&app, &BuildOptions::new().with_dry_run(true), &NoopEventSink)
        .unwrap();

    assert!(report.dry_run);
    assert!(report.hash.is_none());
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].size, KAWPOW.len() as u64);
    assert!(!dir.path().join("kawpowstats").exists());
    assert!(staging_dirs(dir.path()).is_empty());
}

#[test]
fn build_creates_missing_output_directory() {
    let (dir, app) = project();
    let app = app.with_output(dir.path().join("dist/bin/kawpowstats"));

    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    assert!(dir.path().join("dist/bin/kawpowstats").is_file());
    assert!(staging_dirs(&dir.path().join("dist/bin")).is_empty());
}

#[test]
fn build_emits_events_in_order() {
    let (_dir, app) = project();
    let sink = RecordingEventSink::default();

    use_case()
        .execute(&app, &BuildOptions::new(), &sink)
        .unwrap();

    let events = sink.take();
    assert!(matches!(
        events[0],
        BuildEvent::Started { entry_count: 2, .. }
    ));
    assert!(matches!(events[1], BuildEvent::EntryAdded { index: 0, .. }));
    assert!(matches!(events[2], BuildEvent::EntryAdded { index: 1, .. }));
    assert!(matches!(events[3], BuildEvent::ArchiveWritten { .. }));
    assert!(matches!(events[4], BuildEvent::ArtifactWritten { .. }));
    assert!(matches!(events[5], BuildEvent::StagingRemoved { .. }));
    assert_eq!(events.len(), 6);
}

#[test]
fn custom_interpreter_and_stored_compression() {
    let (dir, app) = project();
    let app = app
        .with_interpreter("/opt/python/bin/python3.12")
        .with_compression(crate::models::Compression::Stored);

    use_case()
        .execute(&app, &BuildOptions::new(), &NoopEventSink)
        .unwrap();

    let artifact = std::fs::read(dir.path().join("kawpowstats")).unwrap();
    assert!(artifact.starts_with(b"#!/opt/python/bin/python3.12\nPK"));
    assert!(artifact
        .windows(MINER_API.len())
        .any(|w| w == MINER_API));
}
