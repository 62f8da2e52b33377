use clap::Args;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::{CallToTestCaseInput, InlineStepInput, TestStepInput, TestStepsInput};
use zephyr_sdk::types::{StepMode, TestStep};

use super::helpers::{custom_fields, parse_custom_field, PageArgs};
use super::Context;
use crate::output::{self, cell, opt};

/// Manage the steps of a test case script.
#[derive(Debug, Args)]
pub struct TestStepCmd {
    #[command(subcommand)]
    pub action: TestStepAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum TestStepAction {
    /// List the steps of a test case.
    List {
        /// Test case key (e.g., PROJ-T1).
        test_case_key: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Add a step to a test case: inline text or a call to another test case.
    ///
    /// Examples:
    ///   zephyr teststep create PROJ-T1 --inline "Open settings" --expected-result "Settings shown"
    ///   zephyr teststep create PROJ-T1 --test-case-key PROJ-T7
    ///   zephyr teststep create PROJ-T1 --mode OVERWRITE --inline "Only step"
    Create {
        /// Test case key (e.g., PROJ-T1).
        test_case_key: String,
        /// APPEND adds after existing steps; OVERWRITE replaces them.
        #[arg(long, default_value = "APPEND")]
        mode: StepMode,
        /// Inline step description.
        #[arg(long, required_unless_present = "call", conflicts_with = "call")]
        inline: Option<String>,
        /// Expected result of the inline step.
        #[arg(long, requires = "inline")]
        expected_result: Option<String>,
        /// Test data of the inline step.
        #[arg(long, requires = "inline")]
        test_data: Option<String>,
        /// Delegate this step to another test case.
        #[arg(long = "test-case-key", value_name = "KEY")]
        call: Option<String>,
        /// Custom field of the inline step as key=value (repeatable).
        #[arg(long = "custom-field", value_name = "KEY=VALUE", value_parser = parse_custom_field, requires = "inline")]
        custom_fields: Vec<(String, Value)>,
    },
}

#[derive(Debug, Tabled)]
struct TestStepRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "TEST DATA")]
    test_data: String,
    #[tabled(rename = "EXPECTED RESULT")]
    expected_result: String,
}

fn step_row(position: usize, step: &TestStep) -> TestStepRow {
    match (&step.inline, &step.test_case) {
        (Some(inline), _) => TestStepRow {
            position,
            description: cell(inline.description.as_deref()),
            test_data: cell(inline.test_data.as_deref()),
            expected_result: cell(inline.expected_result.as_deref()),
        },
        (None, call) => TestStepRow {
            position,
            description: format!(
                "Call to {}",
                cell(call.as_ref().and_then(|c| c.test_case_key.as_deref()))
            ),
            test_data: cell(None::<&str>),
            expected_result: cell(None::<&str>),
        },
    }
}

pub async fn run(cmd: TestStepCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        TestStepAction::List {
            test_case_key,
            page,
        } => {
            tracing::info!("Fetching test steps for test case: {}", test_case_key);
            let result = ctx
                .client
                .test_steps(&test_case_key)
                .max_results(page.max_results)
                .start_at(page.start_at)
                .send()
                .await?;
            tracing::info!("Found {} test step(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            let offset = page.start_at as usize;
            let numbered: Vec<(usize, &TestStep)> = result
                .values
                .iter()
                .enumerate()
                .map(|(i, step)| (offset + i + 1, step))
                .collect();
            match ctx.format {
                output::Format::Json => output::print_json(&result.values)?,
                output::Format::Text => {
                    output::print_list(&numbered, ctx.format, |(n, step)| step_row(*n, step))?
                }
            }
        }
        TestStepAction::Create {
            test_case_key,
            mode,
            inline,
            expected_result,
            test_data,
            call,
            custom_fields: fields,
        } => {
            tracing::info!("Creating test steps for test case: {}", test_case_key);
            tracing::debug!("Mode: {}", mode);
            let item = match (inline, call) {
                (Some(description), None) => TestStepInput::Inline(InlineStepInput {
                    description,
                    test_data,
                    expected_result,
                    custom_fields: custom_fields(fields),
                }),
                (None, Some(key)) => TestStepInput::TestCase(CallToTestCaseInput {
                    test_case_key: key,
                }),
                _ => {
                    return Err(anyhow::anyhow!(
                        "Exactly one of --inline or --test-case-key must be provided"
                    ))
                }
            };
            let created = ctx
                .client
                .create_test_steps(
                    &test_case_key,
                    &TestStepsInput {
                        mode,
                        items: vec![item],
                    },
                )
                .await?;
            tracing::info!("Test step created successfully");
            output::print_record(
                &created,
                ctx.format,
                &[
                    ("ID", opt(created.id)),
                    ("Test Case", Some(test_case_key)),
                    ("Mode", Some(mode.to_string())),
                ],
            )?;
        }
    }
    Ok(())
}
