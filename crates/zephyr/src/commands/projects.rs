use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::types::Project;

use super::helpers::PageArgs;
use super::Context;
use crate::output::{self, cell, opt};

/// Inspect Jira projects enabled for Zephyr Scale.
#[derive(Debug, Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum ProjectAction {
    /// List projects.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one project.
    ///
    /// Examples:
    ///   zephyr project get PROJ
    ///   zephyr project get 10005
    Get {
        /// Project id or key.
        id_or_key: String,
    },
}

#[derive(Debug, Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "JIRA PROJECT ID")]
    jira_project_id: String,
    #[tabled(rename = "ENABLED")]
    enabled: String,
}

pub async fn run(cmd: ProjectCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        ProjectAction::List { page } => {
            tracing::info!("Fetching projects");
            let result = ctx
                .client
                .projects()
                .max_results(page.max_results)
                .start_at(page.start_at)
                .send()
                .await?;
            tracing::info!("Found {} project(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |p: &Project| ProjectRow {
                id: cell(p.id),
                key: cell(p.key.as_deref()),
                jira_project_id: cell(p.jira_project_id),
                enabled: cell(p.enabled),
            })?;
        }
        ProjectAction::Get { id_or_key } => {
            tracing::info!("Fetching project: {}", id_or_key);
            let project: Value = ctx.client.project(&id_or_key).await?;
            let typed = Project::deserialize(&project)?;
            output::print_record(
                &project,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Key", typed.key),
                    ("Jira Project ID", opt(typed.jira_project_id)),
                    ("Enabled", opt(typed.enabled)),
                ],
            )?;
        }
    }
    Ok(())
}
