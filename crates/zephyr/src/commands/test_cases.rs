use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::{InlineStepInput, TestCaseCreateInput, TestStepInput, TestStepsInput};
use zephyr_sdk::types::{StepMode, TestCase};

use super::helpers::{custom_fields, merge_custom_fields, merge_field, parse_custom_field, PageArgs};
use super::Context;
use crate::output::{self, cell, opt};

/// Manage test cases.
#[derive(Debug, Args)]
pub struct TestCaseCmd {
    #[command(subcommand)]
    pub action: TestCaseAction,
}

/// Fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct TestCaseFields {
    /// Objective of the test case.
    #[arg(long)]
    objective: Option<String>,
    /// Preconditions of the test case.
    #[arg(long)]
    precondition: Option<String>,
    /// Estimated duration in milliseconds.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    estimated_time: Option<i64>,
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    component_id: Option<i64>,
    #[arg(long)]
    priority_name: Option<String>,
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
    /// Custom field as key=value (repeatable). Numbers, true/false and JSON arrays/objects are typed.
    #[arg(long = "custom-field", value_name = "KEY=VALUE", value_parser = parse_custom_field)]
    custom_fields: Vec<(String, Value)>,
}

impl TestCaseFields {
    fn is_empty(&self) -> bool {
        self.objective.is_none()
            && self.precondition.is_none()
            && self.estimated_time.is_none()
            && self.component_id.is_none()
            && self.priority_name.is_none()
            && self.status_name.is_none()
            && self.folder_id.is_none()
            && self.owner_id.is_none()
            && self.labels.is_none()
            && self.custom_fields.is_empty()
    }
}

#[derive(Debug, clap::Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum TestCaseAction {
    /// List test cases of the project.
    List {
        /// Only test cases directly in this folder.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        folder_id: Option<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one test case.
    Get {
        /// Test case key (e.g., PROJ-T1).
        key: String,
    },
    /// Create a test case, optionally with inline steps.
    ///
    /// Examples:
    ///   zephyr testcase create --name "Login works" --folder-id 42
    ///   zephyr testcase create --name "Checkout" --step "Add item|Cart shows 1" --step "Pay"
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: TestCaseFields,
        /// Inline step as "description" or "description|expected result" (repeatable).
        #[arg(long = "step", value_name = "DESCRIPTION[|EXPECTED]")]
        steps: Vec<String>,
    },
    /// Update a test case. Unspecified fields keep their current value.
    ///
    /// Examples:
    ///   zephyr testcase update PROJ-T1 --name "Login works with SSO"
    ///   zephyr testcase update PROJ-T1 --labels smoke,auth --custom-field risk=high
    Update {
        /// Test case key (e.g., PROJ-T1).
        key: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: TestCaseFields,
    },
}

#[derive(Debug, Tabled)]
struct TestCaseRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "FOLDER")]
    folder: String,
    #[tabled(rename = "CREATED")]
    created_on: String,
}

/// Split `description|expected result` into an inline step.
fn parse_step(raw: &str) -> InlineStepInput {
    let (description, expected) = match raw.split_once('|') {
        Some((description, expected)) => (description.trim(), Some(expected.trim())),
        None => (raw.trim(), None),
    };
    InlineStepInput {
        description: description.to_string(),
        expected_result: expected.filter(|e| !e.is_empty()).map(str::to_string),
        ..Default::default()
    }
}

pub async fn run(cmd: TestCaseCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        TestCaseAction::List { folder_id, page } => {
            tracing::info!("Fetching test cases");
            let mut query = ctx
                .client
                .test_cases()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(folder_id) = folder_id {
                query = query.folder_id(folder_id);
            }
            let result = query.send().await?;
            tracing::info!("Found {} test case(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |tc: &TestCase| TestCaseRow {
                key: tc.key.clone(),
                name: tc.name.clone(),
                folder: cell(tc.folder_id()),
                created_on: cell(tc.created_on.map(|d| d.format("%Y-%m-%d"))),
            })?;
        }
        TestCaseAction::Get { key } => {
            tracing::info!("Fetching test case: {}", key);
            let test_case: Value = ctx.client.test_case(&key).await?;
            let typed = TestCase::deserialize(&test_case)?;
            output::print_record(
                &test_case,
                ctx.format,
                &[
                    ("Key", Some(typed.key.clone())),
                    ("Name", Some(typed.name.clone())),
                    ("Objective", typed.objective.clone()),
                    ("Precondition", typed.precondition.clone()),
                    ("Estimated Time", opt(typed.estimated_time)),
                    ("Labels", typed.labels.as_ref().map(|l| l.join(", "))),
                    ("Folder ID", opt(typed.folder_id())),
                    ("Priority ID", opt(typed.priority.as_ref().and_then(|p| p.id))),
                    ("Status ID", opt(typed.status.as_ref().and_then(|s| s.id))),
                    ("Created", opt(typed.created_on)),
                ],
            )?;
        }
        TestCaseAction::Create {
            name,
            fields,
            steps,
        } => {
            tracing::info!("Creating test case: {}", name);
            let input = TestCaseCreateInput {
                project_key: ctx.project_key.clone(),
                name,
                objective: fields.objective,
                precondition: fields.precondition,
                estimated_time: fields.estimated_time,
                component_id: fields.component_id,
                priority_name: fields.priority_name,
                status_name: fields.status_name,
                folder_id: fields.folder_id,
                owner_id: fields.owner_id,
                labels: fields.labels,
                custom_fields: custom_fields(fields.custom_fields),
            };
            let created = ctx.client.create_test_case(&input).await?;
            tracing::info!("Test case created successfully");

            if !steps.is_empty() {
                let key = created
                    .key
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Created test case has no key; steps not added"))?;
                tracing::info!("Creating {} test step(s)", steps.len());
                let body = TestStepsInput {
                    mode: StepMode::Append,
                    items: steps
                        .iter()
                        .map(|s| TestStepInput::Inline(parse_step(s)))
                        .collect(),
                };
                ctx.client.create_test_steps(key, &body).await?;
                tracing::info!("Test steps created successfully");
            }

            output::print_record(
                &created,
                ctx.format,
                &[("ID", opt(created.id)), ("Key", created.key.clone())],
            )?;
        }
        TestCaseAction::Update { key, name, fields } => {
            if name.is_none() && fields.is_empty() {
                return Err(anyhow::anyhow!(
                    "No update fields provided. See `zephyr testcase update --help`."
                ));
            }
            tracing::info!("Updating test case: {}", key);
            let mut test_case: Value = ctx.client.test_case(&key).await?;
            merge_field(&mut test_case, "name", name);
            merge_field(&mut test_case, "objective", fields.objective);
            merge_field(&mut test_case, "precondition", fields.precondition);
            merge_field(&mut test_case, "estimatedTime", fields.estimated_time);
            merge_field(&mut test_case, "componentId", fields.component_id);
            merge_field(&mut test_case, "priorityName", fields.priority_name);
            merge_field(&mut test_case, "statusName", fields.status_name);
            merge_field(&mut test_case, "folderId", fields.folder_id);
            merge_field(&mut test_case, "ownerId", fields.owner_id);
            merge_field(&mut test_case, "labels", fields.labels);
            merge_custom_fields(&mut test_case, custom_fields(fields.custom_fields));

            ctx.client.update_test_case(&key, &test_case).await?;
            tracing::info!("Test case updated successfully");
            let result = serde_json::json!({ "key": key, "updated": true });
            output::print_record(
                &result,
                ctx.format,
                &[("Key", Some(key)), ("Updated", Some("true".to_string()))],
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_with_expected_result() {
        let step = parse_step("Open the login page | Form is shown");
        assert_eq!(step.description, "Open the login page");
        assert_eq!(step.expected_result.as_deref(), Some("Form is shown"));
    }

    #[test]
    fn step_without_expected_result() {
        let step = parse_step("Click submit");
        assert_eq!(step.description, "Click submit");
        assert_eq!(step.expected_result, None);
        assert_eq!(parse_step("Click|").expected_result, None);
    }
}
