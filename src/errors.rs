use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrsError {
    #[error("No base branches configured. Set them with: git config {key} \"main\"")]
    MissingConfig { key: String },

    #[error("Remote branch '{0}' not found (did you fetch?)")]
    RemoteBranchNotFound(String),

    #[error("Pull request message is empty, aborting")]
    EmptyMessage,

    #[error("HEAD is detached, check out a branch first")]
    DetachedHead,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("GitHub CLI operation failed: {0}")]
    GitHubCli(String),

    #[error("GitHub CLI (gh) not found. Install it from https://cli.github.com/")]
    GitHubCliNotFound,

    #[error("Editor failed: {0}")]
    Editor(String),

    #[error("Failed to read confirmation: {0}")]
    Prompt(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Push of '{0}' was not accepted by the remote")]
    PushRejected(String),

    #[error("Background sync did not finish: {0}")]
    SyncTask(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrsError>;
