use crate::errors::{PrsError, Result};
use crate::git::Git;
use git2::Oid;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    UpToDate,
    Pushed { created: bool },
}

/// Make `<remote>/<branch>` match the local branch
///
/// A failed fetch is only a warning: the comparison then runs against
/// whatever remote-tracking ref we already have.
pub fn sync_branch(git: &Git, remote: &str, branch: &str) -> Result<SyncStatus> {
    if let Err(e) = git.fetch(remote) {
        log::warn!("⚠️  Could not fetch {}: {}", remote, e);
    }

    let local = git.head_id()?;
    let remote_head = git.remote_head(remote, branch)?;

    if remote_head == Some(local) {
        log::info!("{}/{} is up to date", remote, branch);
        return Ok(SyncStatus::UpToDate);
    }

    let created = remote_head.is_none();
    log::info!("pushing {} to {}", branch, remote);
    git.push(remote, branch)?;

    // A ref refused by the server still lets the push call succeed, only
    // the tracking ref tells whether it landed
    let mut pushed_head = git.remote_head(remote, branch)?;
    if pushed_head != Some(local) {
        if let Err(e) = git.fetch(remote) {
            log::warn!("⚠️  Could not fetch {}: {}", remote, e);
        }
        pushed_head = git.remote_head(remote, branch)?;
    }
    check_pushed(local, pushed_head, remote, branch)?;

    if let Err(e) = git.set_upstream(remote, branch) {
        log::warn!("⚠️  Could not set upstream of {}: {}", branch, e);
    }

    Ok(SyncStatus::Pushed { created })
}

fn check_pushed(local: Oid, pushed_head: Option<Oid>, remote: &str, branch: &str) -> Result<()> {
    if pushed_head == Some(local) {
        Ok(())
    } else {
        Err(PrsError::PushRejected(format!("{}/{}", remote, branch)))
    }
}

/// Repository handle for the sync thread
///
/// The foreground owns the terminal (editor, confirmation), so credentials
/// can only come from helpers or the ssh agent here.
pub fn open_for_sync(workdir: &Path) -> Result<Git> {
    Ok(Git::discover(workdir)?.without_prompts())
}

/// The single background job of a run
pub struct SyncTask {
    handle: JoinHandle<Result<SyncStatus>>,
}

impl SyncTask {
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<SyncStatus> + Send + 'static,
    {
        Self {
            handle: std::thread::spawn(job),
        }
    }

    /// Sync on a separate repository handle, `git2::Repository` is not `Sync`
    pub fn start(workdir: PathBuf, remote: String, branch: String) -> Self {
        Self::spawn(move || {
            let git = open_for_sync(&workdir)?;
            sync_branch(&git, &remote, &branch)
        })
    }

    /// Block until the sync is over. Failures are reported, never returned.
    pub fn wait(self) -> Option<SyncStatus> {
        let outcome = self
            .handle
            .join()
            .map_err(|_| PrsError::SyncTask("sync thread panicked".to_string()))
            .and_then(|result| result);

        match outcome {
            Ok(status) => {
                if let SyncStatus::Pushed { created: true } = status {
                    log::info!("Created the remote branch");
                }
                log::debug!("Sync finished: {:?}", status);
                Some(status)
            }
            Err(e) => {
                log::warn!("⚠️  Remote sync failed: {}", e);
                None
            }
        }
    }
}
