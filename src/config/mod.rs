mod loader;

pub use loader::{Config, IssueCategory, IssueConfig, IssuesConfig, ReportConfig, Severity};
