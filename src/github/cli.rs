use crate::errors::{PrsError, Result};
use crate::github::types::PullRequestRef;
use regex::Regex;
#[cfg(test)]
use std::collections::HashMap;
use std::process::Command;

pub trait GitHubCli {
    fn is_available(&self) -> Result<bool>;
    /// URL of an open pull request from `head` into `base`, if there is one
    fn find_open_pr(&self, head: &str, base: &str) -> Result<Option<String>>;
    /// Returns the URL of the new pull request
    fn create_pr(&self, head: &str, base: &str, title: &str, body: &str) -> Result<String>;
}

pub struct GitHubCliImpl;

impl GitHubCliImpl {
    pub fn new() -> Self {
        Self
    }

    fn run_command(&self, args: &[&str]) -> Result<std::process::Output> {
        log::debug!("gh {}", args.join(" "));
        let output = Command::new("gh")
            .args(args)
            .output()
            .map_err(|e| PrsError::GitHubCli(format!("Failed to execute gh command: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrsError::GitHubCli(stderr.trim().to_string()));
        }

        Ok(output)
    }
}

impl GitHubCli for GitHubCliImpl {
    fn is_available(&self) -> Result<bool> {
        match Command::new("gh").arg("--version").output() {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Ok(false),
        }
    }

    fn find_open_pr(&self, head: &str, base: &str) -> Result<Option<String>> {
        let output = self.run_command(&[
            "pr", "list",
            "--head", head,
            "--base", base,
            "--state", "open",
            "--json", "url",
        ])?;

        let prs: Vec<PullRequestRef> = serde_json::from_slice(&output.stdout)?;
        Ok(prs.into_iter().next().map(|pr| pr.url))
    }

    fn create_pr(&self, head: &str, base: &str, title: &str, body: &str) -> Result<String> {
        log::info!("Creating PR: {} → {} (\"{}\")", head, base, title);

        let output = self.run_command(&[
            "pr", "create",
            "--head", head,
            "--base", base,
            "--title", title,
            "--body", body,
        ])?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_url(&stdout).ok_or_else(|| {
            PrsError::GitHubCli(format!("no pull request URL in gh output: {}", stdout.trim()))
        })
    }
}

/// `gh pr create` may print notices before the URL, take the last one
pub fn extract_url(output: &str) -> Option<String> {
    let url_re = Regex::new(r"https?://\S+").ok()?;
    url_re
        .find_iter(output)
        .last()
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
pub struct MockGitHubCli {
    pub available: bool,
    /// base -> URL of an already open pull request
    pub existing_prs: HashMap<String, String>,
    pub failing_bases: Vec<String>,
    pub created_prs: std::sync::Mutex<Vec<(String, String, String, String)>>,
}

#[cfg(test)]
impl MockGitHubCli {
    pub fn new() -> Self {
        Self {
            available: true,
            existing_prs: HashMap::new(),
            failing_bases: Vec::new(),
            created_prs: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_existing_pr(mut self, base: &str, url: &str) -> Self {
        self.existing_prs.insert(base.to_string(), url.to_string());
        self
    }

    pub fn failing_for(mut self, base: &str) -> Self {
        self.failing_bases.push(base.to_string());
        self
    }

    pub fn get_created_prs(&self) -> Vec<(String, String, String, String)> {
        self.created_prs.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl GitHubCli for MockGitHubCli {
    fn is_available(&self) -> Result<bool> {
        Ok(self.available)
    }

    fn find_open_pr(&self, _head: &str, base: &str) -> Result<Option<String>> {
        Ok(self.existing_prs.get(base).cloned())
    }

    fn create_pr(&self, head: &str, base: &str, title: &str, body: &str) -> Result<String> {
        if self.failing_bases.iter().any(|failing| failing == base) {
            return Err(PrsError::GitHubCli(format!("could not create PR into {}", base)));
        }

        let mut created = self.created_prs.lock().unwrap();
        created.push((
            head.to_string(),
            base.to_string(),
            title.to_string(),
            body.to_string(),
        ));
        Ok(format!("https://github.com/acme/app/pull/{}", created.len()))
    }
}
