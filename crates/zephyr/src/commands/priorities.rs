use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::PriorityCreateInput;
use zephyr_sdk::types::Priority;

use super::helpers::PageArgs;
use super::Context;
use crate::output::{self, cell, opt};

/// Manage test case priorities.
#[derive(Debug, Args)]
pub struct PriorityCmd {
    #[command(subcommand)]
    pub action: PriorityAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum PriorityAction {
    /// List priorities of the project.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one priority.
    Get {
        /// Priority id.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Create a priority.
    ///
    /// Examples:
    ///   zephyr priority create --name "Blocker" --color "#FF0000"
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Color in hexadecimal format (e.g., #FF0000).
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Debug, Tabled)]
struct PriorityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "COLOR")]
    color: String,
    #[tabled(rename = "DEFAULT")]
    default: String,
}

pub async fn run(cmd: PriorityCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        PriorityAction::List { page } => {
            tracing::info!("Fetching priorities");
            let result = ctx
                .client
                .priorities()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at)
                .send()
                .await?;
            tracing::info!("Found {} priorit(ies)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |p: &Priority| PriorityRow {
                id: cell(p.id),
                name: cell(p.name.as_deref()),
                color: cell(p.color.as_deref()),
                default: cell(p.default),
            })?;
        }
        PriorityAction::Get { id } => {
            tracing::info!("Fetching priority: {}", id);
            let priority: Value = ctx.client.priority(id).await?;
            let typed = Priority::deserialize(&priority)?;
            output::print_record(
                &priority,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Name", typed.name),
                    ("Description", typed.description),
                    ("Color", typed.color),
                    ("Default", opt(typed.default)),
                ],
            )?;
        }
        PriorityAction::Create {
            name,
            description,
            color,
        } => {
            tracing::info!("Creating priority: {}", name);
            let created = ctx
                .client
                .create_priority(&PriorityCreateInput {
                    project_key: ctx.project_key.clone(),
                    name,
                    description,
                    color,
                })
                .await?;
            tracing::info!("Priority created successfully");
            output::print_record(&created, ctx.format, &[("ID", opt(created.id))])?;
        }
    }
    Ok(())
}
