use clap::Args;
use tabled::Tabled;
use zephyr_sdk::types::{EntityRef, TestCaseLink};

use super::Context;
use crate::output::{self, cell};

/// Find Zephyr resources linked to a Jira issue.
#[derive(Debug, Args)]
pub struct IssueLinkCmd {
    #[command(subcommand)]
    pub action: IssueLinkAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum IssueLinkAction {
    /// Test cases covering the issue.
    ///
    /// Examples:
    ///   zephyr issuelink testcases PROJ-123
    Testcases {
        /// Jira issue key (e.g., PROJ-123).
        issue_key: String,
    },
    /// Test cycles linked to the issue.
    Testcycles {
        /// Jira issue key (e.g., PROJ-123).
        issue_key: String,
    },
    /// Test plans linked to the issue.
    Testplans {
        /// Jira issue key (e.g., PROJ-123).
        issue_key: String,
    },
    /// Test executions linked to the issue.
    Executions {
        /// Jira issue key (e.g., PROJ-123).
        issue_key: String,
    },
}

#[derive(Debug, Tabled)]
struct TestCaseLinkRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "VERSION")]
    version: String,
}

#[derive(Debug, Tabled)]
struct LinkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "URL")]
    self_link: String,
}

fn link_row(link: &EntityRef) -> LinkRow {
    LinkRow {
        id: cell(link.id),
        self_link: cell(link.self_link.as_deref()),
    }
}

pub async fn run(cmd: IssueLinkCmd, ctx: &Context) -> anyhow::Result<()> {
    let (kind, issue_key, links) = match cmd.action {
        IssueLinkAction::Testcases { issue_key } => {
            tracing::info!("Fetching test cases linked to {}", issue_key);
            let links = ctx.client.issue_link_test_cases(&issue_key).await?;
            tracing::info!("Found {} linked test case(s)", links.len());
            return output::print_list(&links, ctx.format, |l: &TestCaseLink| TestCaseLinkRow {
                key: cell(l.key.as_deref()),
                version: cell(l.version),
            });
        }
        IssueLinkAction::Testcycles { issue_key } => {
            let links = ctx.client.issue_link_test_cycles(&issue_key).await;
            ("test cycle", issue_key, links)
        }
        IssueLinkAction::Testplans { issue_key } => {
            let links = ctx.client.issue_link_test_plans(&issue_key).await;
            ("test plan", issue_key, links)
        }
        IssueLinkAction::Executions { issue_key } => {
            let links = ctx.client.issue_link_executions(&issue_key).await;
            ("test execution", issue_key, links)
        }
    };
    let links = links?;
    tracing::info!("Found {} {}(s) linked to {}", links.len(), kind, issue_key);
    output::print_list(&links, ctx.format, link_row)
}
