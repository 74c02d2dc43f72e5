use crate::errors::{PrsError, Result};
use crate::git::Vcs;
use std::path::PathBuf;

pub const BASES_KEY: &str = "pr.bases";
pub const REMOTE_KEY: &str = "pr.remote";
pub const DEFAULT_REMOTE: &str = "origin";

const MESSAGE_FILE: &str = "PR_EDITMSG";

/// Everything one invocation needs to know about where it runs
#[derive(Debug, Clone)]
pub struct Context {
    pub bases: Vec<String>,
    pub remote: String,
    pub workdir: PathBuf,
    pub git_dir: PathBuf,
    pub color: bool,
}

/// Options coming from the command line, they win over git config
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub remote: Option<String>,
    pub color: bool,
}

impl Context {
    pub fn load(
        vcs: &impl Vcs,
        workdir: PathBuf,
        git_dir: PathBuf,
        overrides: Overrides,
    ) -> Result<Self> {
        let bases = parse_bases(vcs.config_value(BASES_KEY)?.as_deref())?;

        let remote = match overrides.remote {
            Some(remote) => remote,
            None => vcs
                .config_value(REMOTE_KEY)?
                .map(|remote| remote.trim().to_string())
                .filter(|remote| !remote.is_empty())
                .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
        };

        log::debug!("Base branches: {:?}, remote: {}", bases, remote);

        Ok(Self {
            bases,
            remote,
            workdir,
            git_dir,
            color: overrides.color,
        })
    }

    /// Scratch file used when the message is edited from a template
    pub fn message_file(&self) -> PathBuf {
        self.git_dir.join(MESSAGE_FILE)
    }

    pub fn remote_ref(&self, base: &str) -> String {
        format!("{}/{}", self.remote, base)
    }
}

/// Split the configured value on whitespace, dropping repeated names
pub fn parse_bases(raw: Option<&str>) -> Result<Vec<String>> {
    let mut bases: Vec<String> = Vec::new();
    for name in raw.unwrap_or_default().split_whitespace() {
        if !bases.iter().any(|known| known == name) {
            bases.push(name.to_string());
        }
    }

    if bases.is_empty() {
        return Err(PrsError::MissingConfig {
            key: BASES_KEY.to_string(),
        });
    }
    Ok(bases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitSummary;
    use std::collections::HashMap;
    use std::path::Path;

    struct ConfigOnly(HashMap<&'static str, &'static str>);

    impl Vcs for ConfigOnly {
        fn config_value(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.get(key).map(|value| value.to_string()))
        }
        fn current_branch(&self) -> Result<String> {
            unreachable!()
        }
        fn last_commit_message(&self) -> Result<String> {
            unreachable!()
        }
        fn remote_branch_exists(&self, _: &str, _: &str) -> Result<bool> {
            unreachable!()
        }
        fn unmerged_commits(&self, _: &str, _: &str) -> Result<Vec<CommitSummary>> {
            unreachable!()
        }
        fn edit_file(&self, _: &Path) -> Result<String> {
            unreachable!()
        }
    }

    fn load(values: &[(&'static str, &'static str)], overrides: Overrides) -> Result<Context> {
        let vcs = ConfigOnly(values.iter().copied().collect());
        Context::load(&vcs, PathBuf::from("/repo"), PathBuf::from("/repo/.git"), overrides)
    }

    #[test]
    fn test_parse_bases_keeps_order() {
        let bases = parse_bases(Some("staging  prod\tmain\n")).unwrap();
        assert_eq!(bases, vec!["staging", "prod", "main"]);
    }

    #[test]
    fn test_parse_bases_drops_duplicates() {
        let bases = parse_bases(Some("prod staging prod")).unwrap();
        assert_eq!(bases, vec!["prod", "staging"]);
    }

    #[test]
    fn test_parse_bases_unset_or_blank() {
        assert!(matches!(parse_bases(None), Err(PrsError::MissingConfig { .. })));
        assert!(matches!(parse_bases(Some("   ")), Err(PrsError::MissingConfig { .. })));
    }

    #[test]
    fn test_missing_config_message_explains_fix() {
        let err = parse_bases(None).unwrap_err();
        assert!(err.to_string().contains("git config pr.bases"));
    }

    #[test]
    fn test_load_defaults_remote_to_origin() {
        let ctx = load(&[(BASES_KEY, "main")], Overrides::default()).unwrap();
        assert_eq!(ctx.remote, "origin");
        assert_eq!(ctx.remote_ref("main"), "origin/main");
        assert_eq!(ctx.message_file(), PathBuf::from("/repo/.git/PR_EDITMSG"));
    }

    #[test]
    fn test_load_remote_from_config_and_flag() {
        let values = [(BASES_KEY, "staging prod"), (REMOTE_KEY, "upstream")];
        let ctx = load(&values, Overrides::default()).unwrap();
        assert_eq!(ctx.remote, "upstream");
        assert_eq!(ctx.bases, vec!["staging", "prod"]);

        let overrides = Overrides {
            remote: Some("fork".to_string()),
            color: false,
        };
        let ctx = load(&values, overrides).unwrap();
        assert_eq!(ctx.remote, "fork");
    }

    #[test]
    fn test_load_without_bases_fails() {
        assert!(matches!(
            load(&[(REMOTE_KEY, "origin")], Overrides::default()),
            Err(PrsError::MissingConfig { .. })
        ));
    }
}
