use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::EnvironmentCreateInput;
use zephyr_sdk::types::Environment;

use super::helpers::{merge_field, PageArgs};
use super::Context;
use crate::output::{self, cell, opt};

/// Manage test environments.
#[derive(Debug, Args)]
pub struct EnvironmentCmd {
    #[command(subcommand)]
    pub action: EnvironmentAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum EnvironmentAction {
    /// List environments of the project.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one environment.
    Get {
        /// Environment id.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Create an environment.
    ///
    /// Examples:
    ///   zephyr environment create --name "Chrome" --description "Latest stable"
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an environment. Unspecified fields keep their current value.
    ///
    /// Examples:
    ///   zephyr environment update 12 --name "Firefox"
    Update {
        /// Environment id.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Tabled)]
struct EnvironmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "ARCHIVED")]
    archived: String,
}

fn print_environment(env: &Value, ctx: &Context) -> anyhow::Result<()> {
    let typed = Environment::deserialize(env)?;
    output::print_record(
        env,
        ctx.format,
        &[
            ("ID", opt(typed.id)),
            ("Name", typed.name),
            ("Description", typed.description),
            ("Index", opt(typed.index)),
            ("Archived", opt(typed.archived)),
        ],
    )
}

pub async fn run(cmd: EnvironmentCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        EnvironmentAction::List { page } => {
            tracing::info!("Fetching environments");
            let result = ctx
                .client
                .environments()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at)
                .send()
                .await?;
            tracing::info!("Found {} environment(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |e: &Environment| EnvironmentRow {
                id: cell(e.id),
                name: cell(e.name.as_deref()),
                description: cell(e.description.as_deref()),
                archived: cell(e.archived),
            })?;
        }
        EnvironmentAction::Get { id } => {
            tracing::info!("Fetching environment: {}", id);
            let env: Value = ctx.client.environment(id).await?;
            print_environment(&env, ctx)?;
        }
        EnvironmentAction::Create { name, description } => {
            tracing::info!("Creating environment: {}", name);
            let created = ctx
                .client
                .create_environment(&EnvironmentCreateInput {
                    project_key: ctx.project_key.clone(),
                    name,
                    description,
                })
                .await?;
            tracing::info!("Environment created successfully");
            output::print_record(&created, ctx.format, &[("ID", opt(created.id))])?;
        }
        EnvironmentAction::Update {
            id,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                return Err(anyhow::anyhow!(
                    "No update fields provided. Use --name or --description."
                ));
            }
            tracing::info!("Updating environment: {}", id);
            let mut env: Value = ctx.client.environment(id).await?;
            merge_field(&mut env, "name", name);
            merge_field(&mut env, "description", description);
            ctx.client.update_environment(id, &env).await?;
            tracing::info!("Environment updated successfully");

            let updated: Value = ctx.client.environment(id).await?;
            print_environment(&updated, ctx)?;
        }
    }
    Ok(())
}
