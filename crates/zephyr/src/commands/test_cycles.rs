use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::TestCycleCreateInput;
use zephyr_sdk::types::TestCycle;

use super::helpers::{
    custom_fields, merge_custom_fields, merge_field, parse_custom_field, parse_date, PageArgs,
};
use super::Context;
use crate::output::{self, cell, opt, Format};
use crate::tree::{self, ApiSource};

/// Manage test cycles.
#[derive(Debug, Args)]
pub struct TestCycleCmd {
    #[command(subcommand)]
    pub action: TestCycleAction,
}

/// Fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct TestCycleFields {
    #[arg(long)]
    description: Option<String>,
    /// Planned start (ISO 8601, e.g. 2024-01-31 or 2024-01-31T09:00:00Z).
    #[arg(long, value_parser = parse_date)]
    planned_start_date: Option<String>,
    /// Planned end (ISO 8601).
    #[arg(long, value_parser = parse_date)]
    planned_end_date: Option<String>,
    /// Jira project version id.
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    jira_project_version: Option<i64>,
    #[arg(long)]
    status_name: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    folder_id: Option<i64>,
    /// Atlassian account id of the owner.
    #[arg(long)]
    owner_id: Option<String>,
    /// Custom field as key=value (repeatable).
    #[arg(long = "custom-field", value_name = "KEY=VALUE", value_parser = parse_custom_field)]
    custom_fields: Vec<(String, Value)>,
}

impl TestCycleFields {
    fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.planned_start_date.is_none()
            && self.planned_end_date.is_none()
            && self.jira_project_version.is_none()
            && self.status_name.is_none()
            && self.folder_id.is_none()
            && self.owner_id.is_none()
            && self.custom_fields.is_empty()
    }
}

#[derive(Debug, clap::Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum TestCycleAction {
    /// List test cycles of the project.
    List {
        /// Only cycles directly in this folder.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        folder_id: Option<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one test cycle.
    Get {
        /// Test cycle id or key (e.g., PROJ-R1).
        id_or_key: String,
    },
    /// Create a test cycle.
    ///
    /// Examples:
    ///   zephyr testcycle create --name "Sprint 12 regression" --planned-start-date 2024-03-01
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: TestCycleFields,
    },
    /// Update a test cycle. Unspecified fields keep their current value.
    ///
    /// Examples:
    ///   zephyr testcycle update PROJ-R1 --status-name "Done"
    Update {
        /// Test cycle id or key (e.g., PROJ-R1).
        id_or_key: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: TestCycleFields,
    },
    /// Show the folders holding the test cases executed in a cycle.
    ///
    /// Examples:
    ///   zephyr testcycle tree PROJ-R1 --format text
    Tree {
        /// Test cycle key (e.g., PROJ-R1).
        key: String,
    },
}

#[derive(Debug, Tabled)]
struct TestCycleRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PLANNED START")]
    planned_start_date: String,
    #[tabled(rename = "PLANNED END")]
    planned_end_date: String,
}

pub async fn run(cmd: TestCycleCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        TestCycleAction::List { folder_id, page } => {
            tracing::info!("Fetching test cycles");
            let mut query = ctx
                .client
                .test_cycles()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(folder_id) = folder_id {
                query = query.folder_id(folder_id);
            }
            let result = query.send().await?;
            tracing::info!("Found {} test cycle(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |c: &TestCycle| TestCycleRow {
                key: cell(c.key.as_deref()),
                name: cell(c.name.as_deref()),
                planned_start_date: cell(c.planned_start_date.as_deref()),
                planned_end_date: cell(c.planned_end_date.as_deref()),
            })?;
        }
        TestCycleAction::Get { id_or_key } => {
            tracing::info!("Fetching test cycle: {}", id_or_key);
            let cycle: Value = ctx.client.test_cycle(&id_or_key).await?;
            let typed = TestCycle::deserialize(&cycle)?;
            output::print_record(
                &cycle,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Key", typed.key),
                    ("Name", typed.name),
                    ("Description", typed.description),
                    ("Planned Start", typed.planned_start_date),
                    ("Planned End", typed.planned_end_date),
                    ("Status ID", opt(typed.status.and_then(|s| s.id))),
                    ("Folder ID", opt(typed.folder.and_then(|f| f.id))),
                ],
            )?;
        }
        TestCycleAction::Create { name, fields } => {
            tracing::info!("Creating test cycle: {}", name);
            let input = TestCycleCreateInput {
                project_key: ctx.project_key.clone(),
                name,
                description: fields.description,
                planned_start_date: fields.planned_start_date,
                planned_end_date: fields.planned_end_date,
                jira_project_version: fields.jira_project_version,
                status_name: fields.status_name,
                folder_id: fields.folder_id,
                owner_id: fields.owner_id,
                custom_fields: custom_fields(fields.custom_fields),
            };
            let created = ctx.client.create_test_cycle(&input).await?;
            tracing::info!("Test cycle created successfully");
            output::print_record(
                &created,
                ctx.format,
                &[("ID", opt(created.id)), ("Key", created.key.clone())],
            )?;
        }
        TestCycleAction::Update {
            id_or_key,
            name,
            fields,
        } => {
            if name.is_none() && fields.is_empty() {
                return Err(anyhow::anyhow!(
                    "No update fields provided. See `zephyr testcycle update --help`."
                ));
            }
            tracing::info!("Updating test cycle: {}", id_or_key);
            let mut cycle: Value = ctx.client.test_cycle(&id_or_key).await?;
            merge_field(&mut cycle, "name", name);
            merge_field(&mut cycle, "description", fields.description);
            merge_field(&mut cycle, "plannedStartDate", fields.planned_start_date);
            merge_field(&mut cycle, "plannedEndDate", fields.planned_end_date);
            merge_field(&mut cycle, "jiraProjectVersion", fields.jira_project_version);
            merge_field(&mut cycle, "statusName", fields.status_name);
            merge_field(&mut cycle, "folderId", fields.folder_id);
            merge_field(&mut cycle, "ownerId", fields.owner_id);
            merge_custom_fields(&mut cycle, custom_fields(fields.custom_fields));

            ctx.client.update_test_cycle(&id_or_key, &cycle).await?;
            tracing::info!("Test cycle updated successfully: {}", id_or_key);
            let result = serde_json::json!({ "key": id_or_key, "updated": true });
            output::print_record(
                &result,
                ctx.format,
                &[("Key", Some(id_or_key)), ("Updated", Some("true".to_string()))],
            )?;
        }
        TestCycleAction::Tree { key } => {
            let source = ApiSource::new(&ctx.client, &ctx.project_key);
            let forest = tree::cycle_tree(&source, &key).await?;
            match ctx.format {
                Format::Json => output::print_json(&forest)?,
                Format::Text if forest.is_empty() => println!("(No test cases in this cycle)"),
                Format::Text => println!("{}", tree::render_text(&forest)),
            }
        }
    }
    Ok(())
}
