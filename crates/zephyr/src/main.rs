mod commands;
mod config;
mod output;
mod tree;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zephyr_sdk::Client;

use commands::Context;

/// zephyr - command line client for Zephyr Scale Cloud
#[derive(Debug, Parser)]
#[command(name = "zephyr", version, about)]
struct Cli {
    /// Config file (default: $ZEPHYR_CONFIG_PATH or ~/.zephyr/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profile to use instead of the config's currentProfile.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// API token (overrides $ZEPHYR_API_TOKEN and the profile).
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Project key (overrides the profile).
    #[arg(long, global = true)]
    project_key: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = output::Format::Json)]
    format: output::Format,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log requests and internals to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a compact command reference.
    Usage,
    /// Inspect projects.
    Project(commands::projects::ProjectCmd),
    /// Manage environments.
    Environment(commands::environments::EnvironmentCmd),
    /// Manage priorities.
    Priority(commands::priorities::PriorityCmd),
    /// Manage statuses.
    Status(commands::statuses::StatusCmd),
    /// Manage folders and show the folder tree.
    Folder(commands::folders::FolderCmd),
    /// Manage test cases.
    Testcase(commands::test_cases::TestCaseCmd),
    /// Manage test steps of a test case.
    Teststep(commands::test_steps::TestStepCmd),
    /// Manage test cycles.
    Testcycle(commands::test_cycles::TestCycleCmd),
    /// Manage test plans.
    Testplan(commands::test_plans::TestPlanCmd),
    /// Manage test executions.
    Testexecution(commands::test_executions::TestExecutionCmd),
    /// Find resources linked to a Jira issue.
    Issuelink(commands::issue_links::IssueLinkCmd),
}

/// Send logs to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins over the flags; without either only errors are shown.
fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init();
}

fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let settings = config::resolve(&config::Overrides {
        config_path: cli.config.as_deref(),
        profile: cli.profile.as_deref(),
        api_token: cli.api_token.as_deref(),
        project_key: cli.project_key.as_deref(),
    })?;
    let mut client = Client::from_token(settings.api_token)?;
    if let Some(base_url) = settings.base_url {
        tracing::debug!("Using API root {}", base_url);
        client = client.with_base_url(base_url);
    }
    Ok(Context {
        client,
        project_key: settings.project_key,
        format: cli.format,
    })
}

async fn dispatch(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Project(cmd) => commands::projects::run(cmd, ctx).await,
        Command::Environment(cmd) => commands::environments::run(cmd, ctx).await,
        Command::Priority(cmd) => commands::priorities::run(cmd, ctx).await,
        Command::Status(cmd) => commands::statuses::run(cmd, ctx).await,
        Command::Folder(cmd) => commands::folders::run(cmd, ctx).await,
        Command::Testcase(cmd) => commands::test_cases::run(cmd, ctx).await,
        Command::Teststep(cmd) => commands::test_steps::run(cmd, ctx).await,
        Command::Testcycle(cmd) => commands::test_cycles::run(cmd, ctx).await,
        Command::Testplan(cmd) => commands::test_plans::run(cmd, ctx).await,
        Command::Testexecution(cmd) => commands::test_executions::run(cmd, ctx).await,
        Command::Issuelink(cmd) => commands::issue_links::run(cmd, ctx).await,
        Command::Usage => {
            commands::usage::run();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    // Needs no configuration.
    if matches!(cli.command, Command::Usage) {
        commands::usage::run();
        return;
    }

    let ctx = match build_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(cli.command, &ctx).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
