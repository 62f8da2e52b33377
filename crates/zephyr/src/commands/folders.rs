use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;
use zephyr_sdk::inputs::FolderCreateInput;
use zephyr_sdk::types::{Folder, FolderType};

use super::helpers::PageArgs;
use super::Context;
use crate::output::{self, cell, opt, Format};
use crate::tree::{self, ApiSource, TestCaseMode};

/// Manage folders and show the folder tree.
#[derive(Debug, Args)]
pub struct FolderCmd {
    #[command(subcommand)]
    pub action: FolderAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum FolderAction {
    /// List folders of the project.
    ///
    /// Examples:
    ///   zephyr folder list --folder-type TEST_CASE --max-results 100
    List {
        /// Only folders of this type (TEST_CASE, TEST_PLAN, TEST_CYCLE).
        #[arg(long)]
        folder_type: Option<FolderType>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one folder.
    Get {
        /// Folder id.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Create a folder.
    ///
    /// Examples:
    ///   zephyr folder create --name "Regression" --folder-type TEST_CASE
    ///   zephyr folder create --name "Login" --folder-type TEST_CASE --parent-id 42
    Create {
        #[arg(long)]
        name: String,
        /// Folder type (TEST_CASE, TEST_PLAN, TEST_CYCLE).
        #[arg(long)]
        folder_type: FolderType,
        /// Parent folder id. Omit for a top-level folder.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        parent_id: Option<i64>,
    },
    /// Show the test case folder hierarchy of the project.
    ///
    /// Examples:
    ///   zephyr folder tree --format text
    ///   zephyr folder tree --max-test-cases 5
    ///   zephyr folder tree --all-test-cases
    Tree {
        /// Include up to N test cases per folder.
        #[arg(
            long,
            value_name = "N",
            conflicts_with = "all_test_cases",
            value_parser = clap::value_parser!(u32).range(1..=1000)
        )]
        max_test_cases: Option<u32>,
        /// Include every test case of every folder.
        #[arg(long)]
        all_test_cases: bool,
    },
}

#[derive(Debug, Tabled)]
struct FolderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    folder_type: String,
    #[tabled(rename = "PARENT")]
    parent_id: String,
}

pub async fn run(cmd: FolderCmd, ctx: &Context) -> anyhow::Result<()> {
    match cmd.action {
        FolderAction::List { folder_type, page } => {
            tracing::info!("Fetching folders");
            let mut query = ctx
                .client
                .folders()
                .project_key(&ctx.project_key)
                .max_results(page.max_results)
                .start_at(page.start_at);
            if let Some(folder_type) = folder_type {
                query = query.folder_type(folder_type);
            }
            let result = query.send().await?;
            tracing::info!("Found {} folder(s)", result.values.len());
            output::pagination_hint(result.has_next, page.start_at, page.max_results);
            output::print_list(&result.values, ctx.format, |f: &Folder| FolderRow {
                id: f.id,
                name: f.name.clone(),
                folder_type: cell(f.folder_type),
                parent_id: cell(f.parent_id),
            })?;
        }
        FolderAction::Get { id } => {
            tracing::info!("Fetching folder: {}", id);
            let folder: Value = ctx.client.folder(id).await?;
            let typed = Folder::deserialize(&folder)?;
            output::print_record(
                &folder,
                ctx.format,
                &[
                    ("ID", Some(typed.id.to_string())),
                    ("Name", Some(typed.name)),
                    ("Type", opt(typed.folder_type)),
                    ("Parent ID", opt(typed.parent_id)),
                    ("Index", opt(typed.index)),
                    ("Project ID", opt(typed.project.and_then(|p| p.id))),
                ],
            )?;
        }
        FolderAction::Create {
            name,
            folder_type,
            parent_id,
        } => {
            tracing::info!("Creating folder: {}", name);
            let created = ctx
                .client
                .create_folder(&FolderCreateInput {
                    project_key: ctx.project_key.clone(),
                    name,
                    folder_type,
                    parent_id,
                })
                .await?;
            tracing::info!("Folder created successfully");
            output::print_record(&created, ctx.format, &[("ID", opt(created.id))])?;
        }
        FolderAction::Tree {
            max_test_cases,
            all_test_cases,
        } => {
            let mode = match (max_test_cases, all_test_cases) {
                (_, true) => TestCaseMode::All,
                (Some(n), false) => TestCaseMode::UpTo(n),
                (None, false) => TestCaseMode::None,
            };
            let source = ApiSource::new(&ctx.client, &ctx.project_key);
            let forest = tree::folder_tree(&source, mode).await?;
            match ctx.format {
                Format::Json => output::print_json(&forest)?,
                Format::Text if forest.is_empty() => println!("(No folders)"),
                Format::Text => println!("{}", tree::render_text(&forest)),
            }
        }
    }
    Ok(())
}
