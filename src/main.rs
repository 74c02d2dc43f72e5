use clap::Parser;
use commands::open::Open;
use git::Git;

mod commands;
mod config;
mod errors;
mod git;
mod github;
mod message;
mod preview;
mod sync;
mod terminal;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "git-prs")]
#[command(about = "Open pull requests from the current branch to every configured base branch", long_about = None)]
#[command(after_help = "Base branches are read from `git config pr.bases`, e.g. \"staging prod\".")]
struct Cli {
    #[command(flatten)]
    open: Open,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    let result = Git::discover(".").and_then(|git| args.open.execute(git));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
