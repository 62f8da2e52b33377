use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::TestPlanCreateInput;
use zephyr_sdk::types::TestPlan;

use super::helpers::{custom_fields, parse_custom_field, PageArgs};
use super::Context;
use crate::output::{self, cell, opt};

/// Manage test plans.
#[derive(Debug, Args)]
pub struct TestPlanCmd {
    #[command(subcommand)]
    pub action: TestPlanAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum TestPlanAction {
    /// List test plans of the project.
    List {
        /// Only plans directly in this folder.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        folder_id: Option<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one test plan.
    Get {
        /// Test plan id or key (e.g., PROJ-P1).
        id_or_key: String,
    },
    /// Create a test plan.
    ///
    /// Examples:
    ///   zephyr testplan create --name "Release 2.0" --labels release,regression
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        status_name: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        folder_id: Option<i64>,
        /// Atlassian account id of the owner.
        #[arg(long)]
        owner_id: Option<String>,
        /// Comma-separated labels.
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,
        /// Custom field as key=value (repeatable).
        #[arg(long = "custom-field", value_name = "KEY=VALUE", value_parser = parse_custom_field)]
        custom_fields: Vec<(String, Value)>,
    },
}

#[derive(Debug, Tabled)]
struct TestPlanRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "LABELS")]
    labels: String,
}

pub async fn run(cmd: TestPlanCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        TestPlanAction::List { folder_id, page } => {
            tracing::info!("Fetching test plans");
            let mut query = ctx
                .client
                .test_plans()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(folder_id) = folder_id {
                query = query.folder_id(folder_id);
            }
            let result = query.send().await?;
            tracing::info!("Found {} test plan(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |p: &TestPlan| TestPlanRow {
                key: cell(p.key.as_deref()),
                name: cell(p.name.as_deref()),
                labels: p.labels.as_ref().map(|l| l.join(", ")).unwrap_or_default(),
            })?;
        }
        TestPlanAction::Get { id_or_key } => {
            tracing::info!("Fetching test plan: {}", id_or_key);
            let plan: Value = ctx.client.test_plan(&id_or_key).await?;
            let typed = TestPlan::deserialize(&plan)?;
            output::print_record(
                &plan,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Key", typed.key),
                    ("Name", typed.name),
                    ("Objective", typed.objective),
                    ("Labels", typed.labels.map(|l| l.join(", "))),
                    ("Status ID", opt(typed.status.and_then(|s| s.id))),
                    ("Folder ID", opt(typed.folder.and_then(|f| f.id))),
                ],
            )?;
        }
        TestPlanAction::Create {
            name,
            objective,
            status_name,
            folder_id,
            owner_id,
            labels,
            custom_fields: fields,
        } => {
            tracing::info!("Creating test plan: {}", name);
            let input = TestPlanCreateInput {
                project_key: ctx.project_key.clone(),
                name,
                objective,
                status_name,
                folder_id,
                owner_id,
                labels,
                custom_fields: custom_fields(fields),
            };
            let created = ctx.client.create_test_plan(&input).await?;
            tracing::info!("Test plan created successfully");
            output::print_record(
                &created,
                ctx.format,
                &[("ID", opt(created.id)), ("Key", created.key.clone())],
            )?;
        }
    }
    Ok(())
}
