use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::StatusCreateInput;
use zephyr_sdk::types::{Status, StatusType};

use super::helpers::PageArgs;
use super::Context;
use crate::output::{self, cell, opt};

/// Manage statuses of test cases, plans, cycles and executions.
#[derive(Debug, Args)]
pub struct StatusCmd {
    #[command(subcommand)]
    pub action: StatusAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum StatusAction {
    /// List statuses of the project.
    ///
    /// Examples:
    ///   zephyr status list --status-type TEST_EXECUTION
    List {
        /// Only statuses of this type (TEST_CASE, TEST_PLAN, TEST_CYCLE, TEST_EXECUTION).
        #[arg(long)]
        status_type: Option<StatusType>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one status.
    Get {
        /// Status id.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Create a status.
    ///
    /// Examples:
    ///   zephyr status create --name "Needs Review" --type TEST_CASE
    Create {
        #[arg(long)]
        name: String,
        /// Status type (TEST_CASE, TEST_PLAN, TEST_CYCLE, TEST_EXECUTION).
        #[arg(long = "type")]
        status_type: StatusType,
        #[arg(long)]
        description: Option<String>,
        /// Color in hexadecimal format (e.g., #FF0000).
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Debug, Tabled)]
struct StatusRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    status_type: String,
    #[tabled(rename = "COLOR")]
    color: String,
    #[tabled(rename = "ARCHIVED")]
    archived: String,
}

pub async fn run(cmd: StatusCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        StatusAction::List { status_type, page } => {
            tracing::info!("Fetching statuses");
            let mut query = ctx
                .client
                .statuses()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(status_type) = status_type {
                query = query.status_type(status_type);
            }
            let result = query.send().await?;
            tracing::info!("Found {} status(es)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |s: &Status| StatusRow {
                id: cell(s.id),
                name: cell(s.name.as_deref()),
                status_type: cell(s.status_type),
                color: cell(s.color.as_deref()),
                archived: cell(s.archived),
            })?;
        }
        StatusAction::Get { id } => {
            tracing::info!("Fetching status: {}", id);
            let status: Value = ctx.client.status(id).await?;
            let typed = Status::deserialize(&status)?;
            output::print_record(
                &status,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Name", typed.name),
                    ("Type", opt(typed.status_type)),
                    ("Description", typed.description),
                    ("Color", typed.color),
                    ("Archived", opt(typed.archived)),
                    ("Default", opt(typed.default)),
                ],
            )?;
        }
        StatusAction::Create {
            name,
            status_type,
            description,
            color,
        } => {
            tracing::info!("Creating status: {}", name);
            let created = ctx
                .client
                .create_status(&StatusCreateInput {
                    project_key: ctx.project_key.clone(),
                    name,
                    status_type,
                    description,
                    color,
                })
                .await?;
            tracing::info!("Status created successfully");
            output::print_record(&created, ctx.format, &[("ID", opt(created.id))])?;
        }
    }
    Ok(())
}
