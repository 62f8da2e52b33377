use zephyr_sdk::auth::TOKEN_ENV_VAR;

use crate::config::CONFIG_PATH_ENV_VAR;

/// Print a compact command reference. Needs no configuration.
pub fn run() {
    let env_hint = if std::env::var(TOKEN_ENV_VAR).is_ok_and(|t| !t.trim().is_empty()) {
        " (set)"
    } else {
        ""
    };

    print!(
        r#"zephyr - Zephyr Scale Cloud CLI

COMMANDS:
  zephyr project list | get <ID|KEY>               Jira projects enabled for Zephyr
  zephyr environment list | get <ID>               Environments
  zephyr environment create --name N [--description D]
  zephyr environment update <ID> [--name N] [--description D]
  zephyr priority list | get <ID>                  Priorities
  zephyr priority create --name N [--description D] [--color #RRGGBB]
  zephyr status list [--status-type TYPE] | get <ID>
  zephyr status create --name N --type TYPE [--description D] [--color #RRGGBB]
  zephyr folder list [--folder-type TYPE] | get <ID>
  zephyr folder create --name N --folder-type TYPE [--parent-id ID]
  zephyr folder tree                               Test case folder hierarchy
    [--max-test-cases N | --all-test-cases]        Include test cases per folder
  zephyr testcase list [--folder-id ID] | get <KEY>
  zephyr testcase create --name N [--folder-id ID] [--step "desc|expected"]...
  zephyr testcase update <KEY> [--name N] [--labels a,b] [--custom-field k=v]...
  zephyr teststep list <KEY>
  zephyr teststep create <KEY> --inline TEXT [--expected-result T] [--test-data T]
  zephyr teststep create <KEY> --test-case-key KEY [--mode APPEND|OVERWRITE]
  zephyr testcycle list [--folder-id ID] | get <ID|KEY>
  zephyr testcycle create --name N [--planned-start-date D] [--planned-end-date D]
  zephyr testcycle update <ID|KEY> [--name N] [--status-name S] ...
  zephyr testcycle tree <KEY>                      Folders of the cycle's test cases
  zephyr testplan list [--folder-id ID] | get <ID|KEY>
  zephyr testplan create --name N [--objective O] [--labels a,b]
  zephyr testexecution list [--test-cycle KEY] [--test-case KEY] [--only-last-executions]
  zephyr testexecution get <ID|KEY>
  zephyr testexecution create --test-case-key K --test-cycle-key K --status-name S
  zephyr testexecution update <ID|KEY> --status-name S [--comment C] ...
  zephyr testexecution update --test-cycle KEY --status-name S    Every execution in a cycle
  zephyr issuelink testcases|testcycles|testplans|executions <ISSUE-KEY>

LIST OPTIONS:
  --max-results N (1-1000, default 10)   --start-at N (default 0)

GLOBAL OPTIONS:
  --format json|text    Output format (default json)
  --profile NAME        Profile from the config file
  --config PATH         Config file location
  --api-token TOKEN     Override API token
  --project-key KEY     Override project key
  -v, --verbose         Progress messages on stderr
  --debug               Debug logging on stderr (RUST_LOG overrides)

CONFIG (in precedence order):
  1. --api-token / --project-key flags
  2. ${TOKEN_ENV_VAR} env var{env_hint}
  3. Profile in --config, ${CONFIG_PATH_ENV_VAR}, or ~/.zephyr/config.json
"#
    );
}
