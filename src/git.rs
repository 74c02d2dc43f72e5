use crate::errors::{PrsError, Result};
use auth_git2::GitAuthenticator;
use git2::{BranchType, Commit, ErrorCode, Oid, Reference, Repository, Sort};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

const DEFAULT_EDITOR: &str = "vi";

/// One line of `git log --oneline`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub short_id: String,
    pub subject: String,
}

impl CommitSummary {
    fn from_commit(commit: &Commit) -> Result<Self> {
        let short_id = commit.as_object().short_id()?;
        Ok(Self {
            short_id: short_id.as_str().unwrap_or_default().to_string(),
            subject: commit.summary().unwrap_or_default().to_string(),
        })
    }
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.short_id, self.subject)
    }
}

/// Read-side repository queries the workflow needs.
pub trait Vcs {
    fn config_value(&self, key: &str) -> Result<Option<String>>;
    fn current_branch(&self) -> Result<String>;
    fn last_commit_message(&self) -> Result<String>;
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool>;
    /// Commits reachable from HEAD but not from `<remote>/<base>`, newest first
    fn unmerged_commits(&self, remote: &str, base: &str) -> Result<Vec<CommitSummary>>;
    /// Open the user's editor on `path` and return the saved content
    fn edit_file(&self, path: &Path) -> Result<String>;
}

pub struct Git {
    repo: Repository,
    prompts: bool,
}

impl Git {
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self {
            repo,
            prompts: true,
        })
    }

    /// Never ask for a password or a key passphrase on the terminal,
    /// credential helpers and the ssh agent still apply
    pub fn without_prompts(mut self) -> Self {
        self.prompts = false;
        self
    }

    pub fn allows_prompts(&self) -> bool {
        self.prompts
    }

    fn authenticator(&self) -> GitAuthenticator {
        let auth = GitAuthenticator::default();
        if self.prompts {
            auth
        } else {
            auth.try_password_prompt(0).prompt_ssh_key_password(false)
        }
    }

    pub fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf()
    }

    pub fn git_dir(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }

    pub fn head_id(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    fn remote_ref(&self, remote: &str, branch: &str) -> Result<Option<Reference<'_>>> {
        match self
            .repo
            .find_reference(&format!("refs/remotes/{}/{}", remote, branch))
        {
            Ok(reference) => Ok(Some(reference)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Commit the remote-tracking ref `<remote>/<branch>` points to, if any
    pub fn remote_head(&self, remote: &str, branch: &str) -> Result<Option<Oid>> {
        match self.remote_ref(remote, branch)? {
            Some(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            None => Ok(None),
        }
    }

    pub fn fetch(&self, remote_name: &str) -> Result<()> {
        log::debug!("Fetching {}", remote_name);
        let mut remote = self.repo.find_remote(remote_name)?;
        let auth = self.authenticator();
        auth.fetch(&self.repo, &mut remote, &[], None)?;
        Ok(())
    }

    /// Push the local branch to the branch of the same name on `remote_name`
    pub fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        log::debug!("Pushing {} to {}", branch, remote_name);
        let mut remote = self.repo.find_remote(remote_name)?;
        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        let auth = self.authenticator();
        auth.push(&self.repo, &mut remote, &[refspec.as_str()])?;
        Ok(())
    }

    pub fn set_upstream(&self, remote_name: &str, branch: &str) -> Result<()> {
        let mut local = self.repo.find_branch(branch, BranchType::Local)?;
        local.set_upstream(Some(&format!("{}/{}", remote_name, branch)))?;
        Ok(())
    }
}

impl Vcs for Git {
    fn config_value(&self, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?;
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(PrsError::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(PrsError::DetachedHead)
    }

    fn last_commit_message(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.message().unwrap_or_default().to_string())
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        Ok(self.remote_ref(remote, branch)?.is_some())
    }

    fn unmerged_commits(&self, remote: &str, base: &str) -> Result<Vec<CommitSummary>> {
        let base_id = self
            .remote_head(remote, base)?
            .ok_or_else(|| PrsError::RemoteBranchNotFound(format!("{}/{}", remote, base)))?;

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push_head()?;
        walk.hide(base_id)?;

        let mut summaries = Vec::new();
        for id in walk {
            let commit = self.repo.find_commit(id?)?;
            summaries.push(CommitSummary::from_commit(&commit)?);
        }
        Ok(summaries)
    }

    fn edit_file(&self, path: &Path) -> Result<String> {
        let editor = editor_command(std::env::var("EDITOR").ok());
        log::debug!("Opening {} with {}", path.display(), editor);

        // `sh -c` so that editors configured with arguments ("code --wait") work
        let status = Command::new("sh")
            .arg("-c")
            .arg(format!("{} \"$@\"", editor))
            .arg(&editor)
            .arg(path)
            .status()
            .map_err(|e| PrsError::Editor(format!("cannot launch '{}': {}", editor, e)))?;

        if !status.success() {
            return Err(PrsError::Editor(format!("'{}' exited with {}", editor, status)));
        }

        Ok(std::fs::read_to_string(path)?)
    }
}

fn editor_command(from_env: Option<String>) -> String {
    from_env
        .map(|editor| editor.trim().to_string())
        .filter(|editor| !editor.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}
