//! Build options

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Validate and report the plan without writing anything
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
