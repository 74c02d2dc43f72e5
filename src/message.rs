use crate::config::Context;
use crate::errors::{PrsError, Result};
use crate::git::Vcs;
use std::path::{Path, PathBuf};

/// Checked in order, the first existing file wins
pub const TEMPLATE_PATHS: [&str; 6] = [
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    "docs/pull_request_template.md",
    "docs/PULL_REQUEST_TEMPLATE.md",
    "pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
];

const COMMENTS: &str = r#";
; Write the pull request message above.
; The first line is the title, the rest is the description.
; Lines starting with ';' are ignored.
; An empty message aborts the pull request.
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMessage {
    pub title: String,
    pub body: String,
}

impl PullRequestMessage {
    /// Strip comment lines and surrounding whitespace, then split title from body
    pub fn parse(text: &str) -> Result<Self> {
        let cleaned = strip_comments(text);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Err(PrsError::EmptyMessage);
        }

        let (title, body) = match cleaned.split_once('\n') {
            Some((title, body)) => (title.trim(), body.trim()),
            None => (cleaned, ""),
        };

        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}

impl std::fmt::Display for PullRequestMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}\n\n{}", self.title, self.body)
        }
    }
}

pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(';'))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn find_template(workdir: &Path) -> Option<PathBuf> {
    TEMPLATE_PATHS
        .iter()
        .map(|relative| workdir.join(relative))
        .find(|path| path.is_file())
}

/// What the editor opens with: the message, the template, then the help
pub fn seed_editor_text(message: &str, template: &str) -> String {
    format!("{}\n\n{}\n{}", message.trim(), template.trim_end(), COMMENTS)
}

/// Explicit message, or the last commit's message, optionally run through
/// the template editor
pub fn compose(vcs: &impl Vcs, ctx: &Context, explicit: Option<String>) -> Result<PullRequestMessage> {
    let message = match explicit {
        Some(message) => message,
        None => vcs.last_commit_message()?,
    };

    let Some(template_path) = find_template(&ctx.workdir) else {
        return PullRequestMessage::parse(&message);
    };

    log::debug!("Using template {}", template_path.display());
    let template = std::fs::read_to_string(&template_path)?;

    let file_path = ctx.message_file();
    std::fs::write(&file_path, seed_editor_text(&message, &template)).map_err(|e| {
        log::error!("Cannot write file to disk: {}", e);
        e
    })?;

    let content = vcs.edit_file(&file_path)?;
    PullRequestMessage::parse(&content)
}

/// Remove the scratch file if a template edit left one behind
pub fn cleanup(ctx: &Context) {
    let file_path = ctx.message_file();
    if file_path.exists() {
        if let Err(e) = std::fs::remove_file(&file_path) {
            log::warn!("⚠️  Cannot remove {}: {}", file_path.display(), e);
        }
    }
}
