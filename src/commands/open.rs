use crate::{
    config::{Context, Overrides},
    errors::Result,
    git::{Git, Vcs},
    github::{DispatchOutcome, DispatchReport, Dispatcher, GitHubCli, GitHubCliImpl},
    message::{self, PullRequestMessage},
    preview::{self, BranchPreview},
    sync::SyncTask,
    terminal::{InteractiveTerminal, Terminal},
};
use clap::Args;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

#[derive(Debug, Args)]
pub struct Open {
    /// Pull request message, defaults to the last commit message
    pub message: Option<String>,

    /// Remote to sync and compare against, overrides `pr.remote`
    #[arg(long)]
    pub remote: Option<String>,

    /// Open the pull requests without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Declined,
    Dispatched(DispatchReport),
}

impl Open {
    pub fn execute(self, git: Git) -> Result<()> {
        let color = !self.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        let overrides = Overrides {
            remote: self.remote,
            color,
        };
        let ctx = Context::load(&git, git.workdir(), git.git_dir(), overrides)?;

        let dispatcher = Dispatcher::new(GitHubCliImpl::new());
        dispatcher.ensure_available()?;

        let head = git.current_branch()?;
        let sync = SyncTask::start(ctx.workdir.clone(), ctx.remote.clone(), head.clone());

        let mut terminal = InteractiveTerminal::new(self.yes);
        run(
            &ctx,
            &git,
            &dispatcher,
            &mut terminal,
            &head,
            self.message,
            sync,
        )?;
        Ok(())
    }
}

/// Everything after the background sync has been started
///
/// Nothing is opened before the user confirms, and the sync is always
/// joined before the first pull request.
pub fn run<V: Vcs, G: GitHubCli, T: Terminal>(
    ctx: &Context,
    vcs: &V,
    dispatcher: &Dispatcher<G>,
    terminal: &mut T,
    head: &str,
    explicit: Option<String>,
    sync: SyncTask,
) -> Result<Outcome> {
    let message = message::compose(vcs, ctx, explicit)?;
    let previews = preview::build_previews(vcs, ctx)?;

    print_plan(ctx, head, &message, &previews);

    let prompt = match ctx.bases.len() {
        1 => "Open pull request?".to_string(),
        n => format!("Open {} pull requests?", n),
    };
    if !terminal.confirm(&prompt)? {
        println!("Aborted");
        // let an in-flight push finish instead of cutting it off at exit
        sync.wait();
        message::cleanup(ctx);
        return Ok(Outcome::Declined);
    }

    sync.wait();
    let report = dispatcher.open_all(head, &ctx.bases, &message, terminal);
    message::cleanup(ctx);

    print_report(ctx, &report);
    Ok(Outcome::Dispatched(report))
}

fn print_plan(ctx: &Context, head: &str, message: &PullRequestMessage, previews: &[BranchPreview]) {
    if ctx.color {
        println!("{}", message.title.bold());
    } else {
        println!("{}", message.title);
    }
    if !message.body.is_empty() {
        println!("\n{}", message.body);
    }
    println!();

    for preview in previews {
        print!("{}", preview::render_preview(preview, head, ctx.color));
        println!();
    }
}

fn print_report(ctx: &Context, report: &DispatchReport) {
    for (base, outcome) in &report.results {
        let line = match outcome {
            DispatchOutcome::Opened(url) => format!("✅ {}: {}", base, url),
            DispatchOutcome::AlreadyOpen(url) => format!("ℹ️  {} (already open): {}", base, url),
            DispatchOutcome::Failed(error) => format!("❌ {}: {}", base, error),
        };
        if ctx.color && matches!(outcome, DispatchOutcome::Failed(_)) {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    if let Some(url) = report.urls().last() {
        println!("📋 {} copied to clipboard", url);
    }

    let failed = report.failed();
    if !failed.is_empty() {
        log::warn!("⚠️  {} of {} pull requests failed", failed.len(), report.results.len());
    }
}
