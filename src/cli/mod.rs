pub mod host;
pub mod output;

pub use host::{CiHost, ConsoleHost, GitHubActionsHost};
