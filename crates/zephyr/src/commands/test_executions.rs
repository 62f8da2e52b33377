use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::fetch_all;
use zephyr_sdk::inputs::{TestExecutionCreateInput, TestExecutionUpdateInput};
use zephyr_sdk::pagination::DEFAULT_PAGE_SIZE;
use zephyr_sdk::types::TestExecution;

use super::helpers::{custom_fields, parse_custom_field, parse_date, PageArgs};
use super::Context;
use crate::output::{self, cell, opt, Format};

/// Manage test executions.
#[derive(Debug, Args)]
pub struct TestExecutionCmd {
    #[command(subcommand)]
    pub action: TestExecutionAction,
}

/// Result fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct ExecutionFields {
    #[arg(long)]
    environment_name: Option<String>,
    /// When the execution finished (ISO 8601).
    #[arg(long, value_parser = parse_date)]
    actual_end_date: Option<String>,
    /// Execution time in milliseconds.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    execution_time: Option<i64>,
    /// Atlassian account id of the executor.
    #[arg(long)]
    executed_by_id: Option<String>,
    /// Atlassian account id of the assignee.
    #[arg(long)]
    assigned_to_id: Option<String>,
    #[arg(long)]
    comment: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum TestExecutionAction {
    /// List test executions of the project.
    ///
    /// Examples:
    ///   zephyr testexecution list --test-cycle PROJ-R1 --only-last-executions
    List {
        /// Only executions in this test cycle (key).
        #[arg(long, value_name = "KEY")]
        test_cycle: Option<String>,
        /// Only executions of this test case (key).
        #[arg(long, value_name = "KEY")]
        test_case: Option<String>,
        /// Only executions finished after this time (ISO 8601).
        #[arg(long, value_parser = parse_date)]
        actual_end_date_after: Option<String>,
        /// Only executions finished before this time (ISO 8601).
        #[arg(long, value_parser = parse_date)]
        actual_end_date_before: Option<String>,
        /// Only the latest execution of each test case.
        #[arg(long)]
        only_last_executions: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one test execution.
    Get {
        /// Test execution id or key (e.g., PROJ-E1).
        id_or_key: String,
    },
    /// Record a test execution.
    ///
    /// Examples:
    ///   zephyr testexecution create --test-case-key PROJ-T1 --test-cycle-key PROJ-R1 --status-name Pass
    Create {
        #[arg(long, value_name = "KEY")]
        test_case_key: String,
        #[arg(long, value_name = "KEY")]
        test_cycle_key: String,
        #[arg(long)]
        status_name: String,
        #[command(flatten)]
        fields: ExecutionFields,
        /// Custom field as key=value (repeatable).
        #[arg(long = "custom-field", value_name = "KEY=VALUE", value_parser = parse_custom_field)]
        custom_fields: Vec<(String, Value)>,
    },
    /// Update one test execution, or every execution of a test cycle.
    ///
    /// Examples:
    ///   zephyr testexecution update PROJ-E1 --status-name Fail --comment "Timeout"
    ///   zephyr testexecution update --test-cycle PROJ-R1 --status-name Pass
    Update {
        /// Test execution id or key. Ignored with --test-cycle.
        id_or_key: Option<String>,
        /// Update every execution in this test cycle (key).
        #[arg(long, value_name = "KEY")]
        test_cycle: Option<String>,
        #[arg(long)]
        status_name: Option<String>,
        #[command(flatten)]
        fields: ExecutionFields,
    },
}

#[derive(Debug, Tabled)]
struct TestExecutionRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "TEST CASE")]
    test_case: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "ENVIRONMENT")]
    environment: String,
    #[tabled(rename = "ENDED")]
    actual_end_date: String,
}

/// Outcome of one update in a bulk run.
#[derive(Debug, Serialize)]
struct UpdateOutcome {
    key: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdateSummary {
    test_cycle: String,
    total: usize,
    success: usize,
    failed: usize,
    results: Vec<UpdateOutcome>,
}

impl BulkUpdateSummary {
    fn new(test_cycle: String, results: Vec<UpdateOutcome>) -> Self {
        let success = results.iter().filter(|r| r.success).count();
        Self {
            test_cycle,
            total: results.len(),
            success,
            failed: results.len() - success,
            results,
        }
    }
}

fn update_input(status_name: Option<String>, fields: ExecutionFields) -> TestExecutionUpdateInput {
    TestExecutionUpdateInput {
        status_name,
        environment_name: fields.environment_name,
        actual_end_date: fields.actual_end_date,
        execution_time: fields.execution_time,
        executed_by_id: fields.executed_by_id,
        assigned_to_id: fields.assigned_to_id,
        comment: fields.comment,
    }
}

pub async fn run(cmd: TestExecutionCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        TestExecutionAction::List {
            test_cycle,
            test_case,
            actual_end_date_after,
            actual_end_date_before,
            only_last_executions,
            page,
        } => {
            tracing::info!("Fetching test executions");
            let mut query = ctx
                .client
                .test_executions()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(cycle) = test_cycle {
                query = query.test_cycle(cycle);
            }
            if let Some(case) = test_case {
                query = query.test_case(case);
            }
            if let Some(after) = actual_end_date_after {
                query = query.actual_end_date_after(after);
            }
            if let Some(before) = actual_end_date_before {
                query = query.actual_end_date_before(before);
            }
            if only_last_executions {
                query = query.only_last_executions(true);
            }
            let result = query.send().await?;
            tracing::info!("Found {} test execution(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |e: &TestExecution| {
                TestExecutionRow {
                    key: cell(e.reference()),
                    test_case: cell(e.test_case.as_ref().and_then(|t| t.id)),
                    status: cell(e.test_execution_status.as_ref().and_then(|s| s.id)),
                    environment: cell(e.environment.as_ref().and_then(|s| s.id)),
                    actual_end_date: cell(e.actual_end_date.as_deref()),
                }
            })?;
        }
        TestExecutionAction::Get { id_or_key } => {
            tracing::info!("Fetching test execution: {}", id_or_key);
            let execution: Value = ctx.client.test_execution(&id_or_key).await?;
            let typed = TestExecution::deserialize(&execution)?;
            output::print_record(
                &execution,
                ctx.format,
                &[
                    ("ID", opt(typed.id)),
                    ("Key", typed.key),
                    ("Test Case ID", opt(typed.test_case.and_then(|t| t.id))),
                    ("Test Cycle ID", opt(typed.test_cycle.and_then(|t| t.id))),
                    ("Status ID", opt(typed.test_execution_status.and_then(|s| s.id))),
                    ("Environment ID", opt(typed.environment.and_then(|e| e.id))),
                    ("Ended", typed.actual_end_date),
                    ("Execution Time", opt(typed.execution_time)),
                    ("Executed By", typed.executed_by_id),
                    ("Assigned To", typed.assigned_to_id),
                    ("Comment", typed.comment),
                ],
            )?;
        }
        TestExecutionAction::Create {
            test_case_key,
            test_cycle_key,
            status_name,
            fields,
            custom_fields: extra,
        } => {
            tracing::info!(
                "Creating test execution: {} in {}",
                test_case_key,
                test_cycle_key
            );
            let input = TestExecutionCreateInput {
                project_key: ctx.project_key.clone(),
                test_case_key,
                test_cycle_key,
                status_name,
                environment_name: fields.environment_name,
                actual_end_date: fields.actual_end_date,
                execution_time: fields.execution_time,
                executed_by_id: fields.executed_by_id,
                assigned_to_id: fields.assigned_to_id,
                comment: fields.comment,
                custom_fields: custom_fields(extra),
            };
            let created = ctx.client.create_test_execution(&input).await?;
            tracing::info!("Test execution created successfully");
            output::print_record(
                &created,
                ctx.format,
                &[("ID", opt(created.id)), ("Key", created.key.clone())],
            )?;
        }
        TestExecutionAction::Update {
            id_or_key,
            test_cycle,
            status_name,
            fields,
        } => {
            let input = update_input(status_name, fields);
            if input.is_empty() {
                return Err(anyhow::anyhow!(
                    "No update fields provided. See `zephyr testexecution update --help`."
                ));
            }
            match (id_or_key, test_cycle) {
                (id_or_key, Some(cycle)) => {
                    if let Some(ignored) = id_or_key {
                        tracing::warn!(
                            "Both {} and --test-cycle given; updating every execution in {}",
                            ignored,
                            cycle
                        );
                    }
                    update_cycle(ctx, &cycle, &input).await?;
                }
                (Some(id_or_key), None) => {
                    tracing::info!("Updating test execution: {}", id_or_key);
                    ctx.client.update_test_execution(&id_or_key, &input).await?;
                    tracing::info!("Test execution updated successfully");
                    let execution: Value = ctx.client.test_execution(&id_or_key).await?;
                    output::print_json(&execution)?;
                }
                (None, None) => {
                    return Err(anyhow::anyhow!(
                        "Either idOrKey or --test-cycle option must be provided"
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Apply `input` to every execution of `cycle`, continuing past failures.
async fn update_cycle(
    ctx: &Context,
    cycle: &str,
    input: &TestExecutionUpdateInput,
) -> anyhow::Result<()> {
    tracing::info!("Fetching test executions of cycle {}", cycle);
    let executions: Vec<TestExecution> =
        fetch_all(DEFAULT_PAGE_SIZE, move |start_at: u32, max: u32| {
            ctx.client
                .test_executions()
                .project_key(&ctx.project_key)
                .test_cycle(cycle)
                .start_at(start_at)
                .max_results(max)
                .send()
        })
        .await?;

    if executions.is_empty() {
        tracing::warn!("No test executions found in cycle {}", cycle);
        return Ok(());
    }
    tracing::info!("Updating {} test execution(s)", executions.len());

    let mut results = Vec::with_capacity(executions.len());
    for execution in &executions {
        let Some(reference) = execution.reference() else {
            tracing::warn!("Skipping test execution without id or key");
            continue;
        };
        let outcome = match ctx.client.update_test_execution(&reference, input).await {
            Ok(()) => {
                tracing::debug!("Updated {}", reference);
                UpdateOutcome {
                    key: reference,
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to update {}: {}", reference, e);
                UpdateOutcome {
                    key: reference,
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(outcome);
    }

    let summary = BulkUpdateSummary::new(cycle.to_string(), results);
    match ctx.format {
        Format::Json => output::print_json(&summary)?,
        Format::Text => {
            for r in &summary.results {
                match &r.error {
                    None => println!("ok      {}", r.key),
                    Some(e) => println!("failed  {}  {}", r.key, e),
                }
            }
            println!(
                "{} updated, {} failed ({} total)",
                summary.success, summary.failed, summary.total
            );
        }
    }
    if summary.failed > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} test execution update(s) failed",
            summary.failed,
            summary.total
        ));
    }
    Ok(())
}
