use std::path::PathBuf;
use std::time::Duration;

/// How the loop driver runs passes.
#[derive(Debug, Clone)]
pub struct Options {
    pub config_path: PathBuf,
    /// Log the changes a pass would make instead of applying them.
    pub dry_run: bool,
    /// Delay between passes. `None` runs a single pass.
    pub loop_delay: Option<Duration>,
}

impl Options {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            dry_run: false,
            loop_delay: None,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Zero or negative minutes means run once.
    pub fn loop_minutes(mut self, minutes: Option<i64>) -> Self {
        self.loop_delay = minutes
            .filter(|m| *m > 0)
            .map(|m| Duration::from_secs(m.unsigned_abs().saturating_mul(60)));
        self
    }
}
