use super::*;
use crate::github::cli::MockGitHubCli;
use crate::message::PullRequestMessage;
use crate::terminal::MockTerminal;

fn message(title: &str, body: &str) -> PullRequestMessage {
    PullRequestMessage {
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn bases(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_title_for_single_base_has_no_tag() {
    assert_eq!(title_for("Fix crash", "main", false), "Fix crash");
}

#[test]
fn test_title_for_multiple_bases_uppercases_branch() {
    assert_eq!(title_for("Fix crash", "staging", true), "[STAGING] Fix crash");
    assert_eq!(title_for("Fix crash", "release/v2", true), "[RELEASE/V2] Fix crash");
}

#[test]
fn test_missing_gh_is_reported() {
    let mut github_cli = MockGitHubCli::new();
    github_cli.available = false;
    let dispatcher = Dispatcher::new(github_cli);

    assert!(matches!(
        dispatcher.ensure_available(),
        Err(crate::errors::PrsError::GitHubCliNotFound)
    ));
    assert!(Dispatcher::new(MockGitHubCli::new()).ensure_available().is_ok());
}

#[test]
fn test_single_base_opens_untagged_pr() {
    let dispatcher = Dispatcher::new(MockGitHubCli::new());
    let mut terminal = MockTerminal::answering(true);

    let report = dispatcher.open_all(
        "feature",
        &bases(&["main"]),
        &message("Fix crash", "Null check"),
        &mut terminal,
    );

    let created = dispatcher.github_cli.get_created_prs();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "feature");
    assert_eq!(created[0].1, "main");
    assert_eq!(created[0].2, "Fix crash");
    assert_eq!(created[0].3, "Null check");
    assert_eq!(report.urls(), vec!["https://github.com/acme/app/pull/1"]);
    assert_eq!(terminal.clipboard, vec!["https://github.com/acme/app/pull/1"]);
}

#[test]
fn test_multiple_bases_open_one_tagged_pr_each() {
    let dispatcher = Dispatcher::new(MockGitHubCli::new());
    let mut terminal = MockTerminal::answering(true);

    let report = dispatcher.open_all(
        "feature",
        &bases(&["staging", "prod"]),
        &message("Fix crash", ""),
        &mut terminal,
    );

    let created = dispatcher.github_cli.get_created_prs();
    let titles: Vec<_> = created.iter().map(|pr| pr.2.as_str()).collect();
    assert_eq!(titles, vec!["[STAGING] Fix crash", "[PROD] Fix crash"]);
    assert!(report.failed().is_empty());

    // last URL wins
    assert_eq!(
        terminal.clipboard.last().map(String::as_str),
        Some("https://github.com/acme/app/pull/2")
    );
}

#[test]
fn test_failure_on_one_base_does_not_stop_the_others() {
    let dispatcher = Dispatcher::new(MockGitHubCli::new().failing_for("staging"));
    let mut terminal = MockTerminal::answering(true);

    let report = dispatcher.open_all(
        "feature",
        &bases(&["staging", "prod"]),
        &message("Fix crash", ""),
        &mut terminal,
    );

    assert_eq!(report.failed(), vec!["staging"]);
    let created = dispatcher.github_cli.get_created_prs();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].1, "prod");
    assert_eq!(terminal.clipboard.len(), 1);
}

#[test]
fn test_existing_pr_is_reused() {
    let github_cli = MockGitHubCli::new().with_existing_pr("prod", "https://github.com/acme/app/pull/99");
    let dispatcher = Dispatcher::new(github_cli);
    let mut terminal = MockTerminal::answering(true);

    let report = dispatcher.open_all(
        "feature",
        &bases(&["staging", "prod"]),
        &message("Fix crash", ""),
        &mut terminal,
    );

    assert_eq!(dispatcher.github_cli.get_created_prs().len(), 1);
    assert_eq!(
        report.results[1],
        (
            "prod".to_string(),
            DispatchOutcome::AlreadyOpen("https://github.com/acme/app/pull/99".to_string())
        )
    );
    assert_eq!(
        terminal.clipboard.last().map(String::as_str),
        Some("https://github.com/acme/app/pull/99")
    );
}
