use crate::errors::{PrsError, Result};
use crate::github::types::{DispatchOutcome, DispatchReport};
use crate::github::GitHubCli;
use crate::message::PullRequestMessage;
use crate::terminal::Terminal;

pub struct Dispatcher<T: GitHubCli> {
    pub github_cli: T,
}

impl<T: GitHubCli> Dispatcher<T> {
    pub fn new(github_cli: T) -> Self {
        Self { github_cli }
    }

    pub fn ensure_available(&self) -> Result<()> {
        if self.github_cli.is_available()? {
            Ok(())
        } else {
            Err(PrsError::GitHubCliNotFound)
        }
    }

    /// Open one pull request per base branch
    ///
    /// Best effort: a failure for one base is logged and the next one is
    /// tried. Every URL goes to the clipboard, so the last one stays there.
    pub fn open_all(
        &self,
        head: &str,
        bases: &[String],
        message: &PullRequestMessage,
        terminal: &mut impl Terminal,
    ) -> DispatchReport {
        let tagged = bases.len() > 1;
        let mut report = DispatchReport::default();

        for base in bases {
            let title = title_for(&message.title, base, tagged);
            let outcome = match self.open_one(head, base, &title, &message.body) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("❌ Failed to open PR into {}: {}", base, e);
                    DispatchOutcome::Failed(e.to_string())
                }
            };

            if let Some(url) = outcome.url() {
                if let Err(e) = terminal.copy_to_clipboard(url) {
                    log::warn!("⚠️  {}", e);
                }
            }
            report.results.push((base.clone(), outcome));
        }

        report
    }

    fn open_one(&self, head: &str, base: &str, title: &str, body: &str) -> Result<DispatchOutcome> {
        if let Some(url) = self.github_cli.find_open_pr(head, base)? {
            log::info!("ℹ️  PR from {} into {} already exists", head, base);
            return Ok(DispatchOutcome::AlreadyOpen(url));
        }

        let url = self.github_cli.create_pr(head, base, title, body)?;
        log::info!("✅ {}", url);
        Ok(DispatchOutcome::Opened(url))
    }
}

/// With several bases each title says which one it targets: `[PROD] Fix crash`
pub fn title_for(title: &str, base: &str, tagged: bool) -> String {
    if tagged {
        format!("[{}] {}", base.to_uppercase(), title)
    } else {
        title.to_string()
    }
}
