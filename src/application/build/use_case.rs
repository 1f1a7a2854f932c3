//! Build Use Case
//!
//! Packages one app into `#!<interpreter>\n` + zip archive.
//!
//! All intermediates live in a fresh `.pyzapp-*` directory inside the output
//! directory, so concurrent builds never share temporary names and the final
//! rename stays on one file system.

use std::path::{Path, PathBuf};

use crate::domain::ports::{Archiver, BuildEvent, BuildEventSink, FileSystem};
use crate::domain::services::compose;
use crate::domain::value_objects::ContentHash;
use crate::error::{IoStep, PackError, PackResult, Step};
use crate::models::{App, ArchiveEntry, PlannedEntry, MAIN_ENTRY, STAGING_PREFIX};

use super::options::BuildOptions;
use super::result::{BuildReport, PackedEntry};

const STAGED_ARCHIVE: &str = "archive.zip";
const STAGED_ARTIFACT: &str = "artifact";

/// Build use case - turns an `App` into an executable zip application
pub struct BuildUseCase<FS, AR>
where
    FS: FileSystem,
    AR: Archiver,
{
    fs: FS,
    archiver: AR,
}

impl<FS, AR> BuildUseCase<FS, AR>
where
    FS: FileSystem,
    AR: Archiver,
{
    pub fn new(fs: FS, archiver: AR) -> Self {
        Self { fs, archiver }
    }

    /// Build a single app.
    ///
    /// Every source is checked before anything is written. On failure the
    /// staging directory is removed and the previous artifact, if any, is
    /// left as it was.
    pub fn execute(
        &self,
        app: &App,
        options: &BuildOptions,
        events: &dyn BuildEventSink,
    ) -> PackResult<BuildReport> {
        let plan = self.validate(app)?;

        events.on_event(BuildEvent::Started {
            app: app.name(),
            output: app.output.clone(),
            entry_count: plan.len(),
        });

        if options.dry_run {
            return self.preview(app, &plan);
        }

        let out_dir = output_dir(&app.output);
        self.fs
            .create_dir_all(&out_dir)
            .at_step(Step::CreateStaging, &out_dir)?;
        let staging = self
            .fs
            .create_temp_dir(&out_dir, STAGING_PREFIX)
            .at_step(Step::CreateStaging, &out_dir)?;

        let built = self.build_in(app, &plan, &staging, events);
        let removed = self
            .fs
            .remove_dir_all(&staging)
            .at_step(Step::RemoveTemporary, &staging);

        // A build error wins over a cleanup error.
        let report = built?;
        removed?;
        events.on_event(BuildEvent::StagingRemoved { path: staging });

        Ok(report)
    }

    fn validate(&self, app: &App) -> PackResult<Vec<PlannedEntry>> {
        let plan = app.plan()?;

        for entry in &plan {
            if !self.fs.is_file(&entry.source) {
                return Err(PackError::MissingSource {
                    path: entry.source.clone(),
                });
            }
        }

        // A missing output cannot alias an existing source.
        let output = if self.fs.exists(&app.output) {
            Some(
                self.fs
                    .canonicalize(&app.output)
                    .at_step(Step::ReadArtifact, &app.output)?,
            )
        } else {
            None
        };
        for entry in &plan {
            let same_file = entry.source == app.output
                || match &output {
                    Some(output) => {
                        self.fs
                            .canonicalize(&entry.source)
                            .at_step(Step::ReadSource, &entry.source)?
                            == *output
                    }
                    None => false,
                };
            if same_file {
                return Err(PackError::OutputIsSource {
                    path: app.output.clone(),
                });
            }
        }

        Ok(plan)
    }

    fn preview(&self, app: &App, plan: &[PlannedEntry]) -> PackResult<BuildReport> {
        let mut entries = Vec::with_capacity(plan.len());
        for planned in plan {
            let data = self
                .fs
                .read(&planned.source)
                .at_step(Step::ReadSource, &planned.source)?;
            entries.push(PackedEntry {
                name: planned.name.clone(),
                source: planned.source.clone(),
                size: data.len() as u64,
            });
        }

        Ok(BuildReport {
            app: app.name(),
            output: app.output.clone(),
            entries,
            size: 0,
            hash: None,
            dry_run: true,
        })
    }

    fn build_in(
        &self,
        app: &App,
        plan: &[PlannedEntry],
        staging: &Path,
        events: &dyn BuildEventSink,
    ) -> PackResult<BuildReport> {
        // The entry point is copied, never moved; the original stays put.
        let main_copy = staging.join(MAIN_ENTRY);
        self.fs
            .copy(&app.entry, &main_copy)
            .at_step(Step::CopyEntryPoint, &app.entry)?;

        let mut entries = Vec::with_capacity(plan.len());
        let mut packed = Vec::with_capacity(plan.len());
        for (index, planned) in plan.iter().enumerate() {
            let read_from = if index == 0 {
                main_copy.as_path()
            } else {
                planned.source.as_path()
            };
            let data = self
                .fs
                .read(read_from)
                .at_step(Step::ReadSource, read_from)?;

            events.on_event(BuildEvent::EntryAdded {
                index,
                name: planned.name.clone(),
                source: planned.source.clone(),
                size: data.len() as u64,
            });
            packed.push(PackedEntry {
                name: planned.name.clone(),
                source: planned.source.clone(),
                size: data.len() as u64,
            });
            entries.push(ArchiveEntry::new(planned.name.clone(), data));
        }

        let archive_path = staging.join(STAGED_ARCHIVE);
        let archive = self.archiver.encode(&entries, app.compression)?;
        self.fs
            .write(&archive_path, &archive)
            .at_step(Step::WriteArchive, &archive_path)?;
        events.on_event(BuildEvent::ArchiveWritten {
            path: archive_path.clone(),
            size: archive.len() as u64,
        });

        let archive = self
            .fs
            .read(&archive_path)
            .at_step(Step::ReadArchive, &archive_path)?;
        let artifact = compose(&app.shebang(), &archive);

        let staged_artifact = staging.join(STAGED_ARTIFACT);
        self.fs
            .write(&staged_artifact, &artifact)
            .at_step(Step::WriteArtifact, &staged_artifact)?;
        self.fs
            .set_executable(&staged_artifact)
            .at_step(Step::SetPermissions, &staged_artifact)?;
        self.fs
            .rename(&staged_artifact, &app.output)
            .at_step(Step::WriteArtifact, &app.output)?;

        let hash = ContentHash::from_bytes(&artifact);
        events.on_event(BuildEvent::ArtifactWritten {
            app: app.name(),
            path: app.output.clone(),
            size: artifact.len() as u64,
            hash: hash.clone(),
        });

        Ok(BuildReport {
            app: app.name(),
            output: app.output.clone(),
            entries: packed,
            size: artifact.len() as u64,
            hash: Some(hash),
            dry_run: false,
        })
    }
}

/// Directory the artifact (and its staging directory) lives in
pub fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
