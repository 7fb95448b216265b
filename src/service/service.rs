use crate::cloudflare::Cloudflare;
use crate::common::{self, Result};
use crate::discovery::HttpResolver;
use crate::Config;

use super::{reconcile, Options, PassSummary, Uuid};

pub struct DNSSync {
    options: Options,
    agent: ureq::Agent,
}

impl DNSSync {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            agent: common::agent(),
        }
    }

    /// Run one pass with freshly loaded configuration.
    pub fn sync(&self) -> Result<PassSummary> {
        let config = Config::load(&self.options.config_path)?;
        let provider = Cloudflare::new(self.agent.clone(), &config.main)?;
        let resolver = HttpResolver::new(self.agent.clone());

        Ok(reconcile(&config, &provider, &resolver, self.options.dry_run))
    }

    /// Run passes until the process is terminated, or once if no loop delay
    /// is set. Pass failures are logged and never end the loop.
    pub fn run(&self) {
        loop {
            let pass_id = Uuid::new_v4();
            tracing::info!(
                pass_id = %pass_id,
                config = %self.options.config_path.display(),
                "Starting pass"
            );

            match self.sync() {
                Ok(summary) => tracing::info!(
                    pass_id = %pass_id,
                    updated = summary.updated,
                    unchanged = summary.unchanged,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    unresolved = summary.unresolved,
                    "Pass completed"
                ),
                Err(err) => tracing::error!(pass_id = %pass_id, "Pass failed: {err}"),
            }

            let Some(delay) = self.options.loop_delay else {
                break;
            };
            tracing::info!(minutes = delay.as_secs() / 60, "Sleeping until next pass");
            std::thread::sleep(delay);
        }
    }
}
