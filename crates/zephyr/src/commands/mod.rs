pub mod environments;
pub mod folders;
pub mod helpers;
pub mod issue_links;
pub mod priorities;
pub mod projects;
pub mod statuses;
pub mod test_cases;
pub mod test_cycles;
pub mod test_executions;
pub mod test_plans;
pub mod test_steps;
pub mod usage;

use zephyr_sdk::Client;

use crate::output::Format;

/// Resolved client and defaults every command runs with.
pub struct Context {
    pub client: Client,
    pub project_key: String,
    pub format: Format,
}
