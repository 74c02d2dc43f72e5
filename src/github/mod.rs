pub mod cli;
pub mod dispatch;
pub mod types;

#[cfg(test)]
mod tests;

pub use cli::{GitHubCli, GitHubCliImpl};
pub use dispatch::{title_for, Dispatcher};
pub use types::{DispatchOutcome, DispatchReport};
