use crate::config::Context;
use crate::errors::{PrsError, Result};
use crate::git::{CommitSummary, Vcs};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPreview {
    pub base: String,
    pub remote_ref: String,
    /// Oldest first
    pub commits: Vec<CommitSummary>,
}

/// `git log` lists newest first, a pull request reads better the other way
pub fn oldest_first(mut commits: Vec<CommitSummary>) -> Vec<CommitSummary> {
    commits.reverse();
    commits
}

pub fn build_previews(vcs: &impl Vcs, ctx: &Context) -> Result<Vec<BranchPreview>> {
    let mut previews = Vec::with_capacity(ctx.bases.len());
    for base in &ctx.bases {
        let remote_ref = ctx.remote_ref(base);
        if !vcs.remote_branch_exists(&ctx.remote, base)? {
            return Err(PrsError::RemoteBranchNotFound(remote_ref));
        }

        let commits = oldest_first(vcs.unmerged_commits(&ctx.remote, base)?);
        log::debug!("{} commits ahead of {}", commits.len(), remote_ref);
        previews.push(BranchPreview {
            base: base.clone(),
            remote_ref,
            commits,
        });
    }
    Ok(previews)
}

pub fn render_preview(preview: &BranchPreview, head: &str, color: bool) -> String {
    let count = match preview.commits.len() {
        1 => "1 commit".to_string(),
        n => format!("{} commits", n),
    };
    let heading = format!("{} -> {} ({})", head, preview.remote_ref, count);

    let mut output = if color {
        format!("{}\n", heading.bold())
    } else {
        format!("{}\n", heading)
    };

    if preview.commits.is_empty() {
        output.push_str("  no new commits\n");
    }
    for commit in &preview.commits {
        if color {
            output.push_str(&format!("  {} {}\n", commit.short_id.yellow(), commit.subject));
        } else {
            output.push_str(&format!("  {}\n", commit));
        }
    }
    output
}
