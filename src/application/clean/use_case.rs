//! Clean Use Case
//!
//! Removes build intermediates: staging directories left by an interrupted
//! build, plus the `__main__.py` copy and `<app>.zip` archive that older
//! make-based builds left next to the sources. Artifacts are never touched.

use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::application::build::output_dir;
use crate::domain::ports::FileSystem;
use crate::models::{App, MAIN_ENTRY, STAGING_PREFIX};

use super::options::CleanOptions;
use super::result::{CleanResult, SkipReason};

/// Clean use case - idempotent removal of temporaries
pub struct CleanUseCase<FS>
where
    FS: FileSystem,
{
    fs: FS,
}

impl<FS> CleanUseCase<FS>
where
    FS: FileSystem,
{
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Remove every temporary belonging to `apps`.
    ///
    /// Missing paths are not errors. Paths that are sources of any app are
    /// reported as skipped and kept.
    pub fn execute(&self, apps: &[App], options: &CleanOptions) -> CleanResult {
        let mut result = CleanResult::new();

        let sources: HashSet<PathBuf> = apps
            .iter()
            .flat_map(|app| std::iter::once(&app.entry).chain(app.modules.iter()))
            .map(|p| normalize(p))
            .collect();
        let artifacts: HashSet<PathBuf> = apps.iter().map(|app| normalize(&app.output)).collect();

        for path in self.candidates(apps, &mut result) {
            let key = normalize(&path);
            if artifacts.contains(&key) || !self.fs.exists(&path) {
                continue;
            }
            if sources.contains(&key) {
                result.add_skipped(path, SkipReason::SourceFile);
                continue;
            }
            if options.dry_run {
                result.add_deleted(path);
                continue;
            }

            let removed = if self.fs.is_dir(&path) {
                self.fs.remove_dir_all(&path)
            } else {
                self.fs.remove(&path)
            };
            match removed {
                Ok(()) => result.add_deleted(path),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => result.add_error(path, e.to_string()),
            }
        }

        result
    }

    fn candidates(&self, apps: &[App], result: &mut CleanResult) -> BTreeSet<PathBuf> {
        let mut candidates = BTreeSet::new();
        let mut scanned = HashSet::new();

        for app in apps {
            let dir = output_dir(&app.output);
            candidates.insert(dir.join(format!("{}.zip", app.name())));

            if !scanned.insert(normalize(&dir)) {
                continue;
            }
            candidates.insert(dir.join(MAIN_ENTRY));

            match self.fs.list_dir(&dir) {
                Ok(children) => {
                    for child in children {
                        if is_staging_dir_name(&child) && self.fs.is_dir(&child) {
                            candidates.insert(child);
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => result.add_error(dir.clone(), e.to_string()),
            }
        }

        candidates
    }
}

fn is_staging_dir_name(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with(STAGING_PREFIX))
        .unwrap_or(false)
}

/// Drop `.` components so `./__main__.py` and `__main__.py` compare equal
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
