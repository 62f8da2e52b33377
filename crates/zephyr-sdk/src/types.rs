//! Response entities of the Zephyr Scale v2 API.
//!
//! Fields the API may omit are `Option`s; every struct tolerates missing
//! keys so that lean responses still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Free-form custom field values keyed by field name.
pub type CustomFields = serde_json::Map<String, serde_json::Value>;

/// Reference to another resource by id, with its API link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRef {
    pub id: Option<i64>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

/// Reference to a Jira user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerRef {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub account_id: Option<String>,
}

/// Link from an entity to a test case (`self` ends in `testcases/<key>/...`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCaseLink {
    pub id: Option<i64>,
    pub key: Option<String>,
    pub version: Option<i64>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<i64>,
    pub jira_project_id: Option<i64>,
    pub key: Option<String>,
    pub enabled: Option<bool>,
}

/// A folder in the test case, test plan or test cycle library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub folder_type: Option<FolderType>,
    #[serde(default)]
    pub project: Option<EntityRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCase {
    pub id: Option<i64>,
    pub key: String,
    pub name: String,
    pub project: Option<EntityRef>,
    pub created_on: Option<DateTime<Utc>>,
    pub objective: Option<String>,
    pub precondition: Option<String>,
    pub estimated_time: Option<i64>,
    pub labels: Option<Vec<String>>,
    pub component: Option<EntityRef>,
    pub priority: Option<EntityRef>,
    pub status: Option<EntityRef>,
    pub folder: Option<EntityRef>,
    pub owner: Option<OwnerRef>,
    pub test_script: Option<EntityRef>,
    pub custom_fields: Option<CustomFields>,
}

impl TestCase {
    /// Id of the folder holding this test case, if any.
    pub fn folder_id(&self) -> Option<i64> {
        self.folder.as_ref().and_then(|f| f.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCycle {
    pub id: Option<i64>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub project: Option<EntityRef>,
    pub jira_project_version: Option<EntityRef>,
    pub status: Option<EntityRef>,
    pub folder: Option<EntityRef>,
    pub description: Option<String>,
    pub planned_start_date: Option<String>,
    pub planned_end_date: Option<String>,
    pub owner: Option<OwnerRef>,
    pub custom_fields: Option<CustomFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestPlan {
    pub id: Option<i64>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub objective: Option<String>,
    pub project: Option<EntityRef>,
    pub status: Option<EntityRef>,
    pub folder: Option<EntityRef>,
    pub owner: Option<OwnerRef>,
    pub labels: Option<Vec<String>>,
    pub custom_fields: Option<CustomFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestExecution {
    pub id: Option<i64>,
    pub key: Option<String>,
    pub project: Option<EntityRef>,
    pub test_case: Option<EntityRef>,
    pub environment: Option<EntityRef>,
    pub jira_project_version: Option<EntityRef>,
    pub test_execution_status: Option<EntityRef>,
    pub actual_end_date: Option<String>,
    pub estimated_time: Option<i64>,
    pub execution_time: Option<i64>,
    pub executed_by_id: Option<String>,
    pub assigned_to_id: Option<String>,
    pub comment: Option<String>,
    pub automated: Option<bool>,
    pub test_cycle: Option<EntityRef>,
    pub custom_fields: Option<CustomFields>,
}

impl TestExecution {
    /// Key or numeric id, whichever identifies this execution best.
    pub fn reference(&self) -> Option<String> {
        self.key
            .clone()
            .or_else(|| self.id.map(|id| id.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Environment {
    pub id: Option<i64>,
    pub project: Option<EntityRef>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub index: Option<i64>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Priority {
    pub id: Option<i64>,
    pub project: Option<EntityRef>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub index: Option<i64>,
    pub color: Option<String>,
    pub default: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    pub id: Option<i64>,
    pub project: Option<EntityRef>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub status_type: Option<StatusType>,
    pub description: Option<String>,
    pub index: Option<i64>,
    pub color: Option<String>,
    pub archived: Option<bool>,
    pub default: Option<bool>,
}

/// A test script step: either written inline or delegated to another test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestStep {
    pub inline: Option<InlineStep>,
    pub test_case: Option<CallToTestCase>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineStep {
    pub description: Option<String>,
    pub test_data: Option<String>,
    pub expected_result: Option<String>,
    pub custom_fields: Option<CustomFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallToTestCase {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub test_case_key: Option<String>,
}

/// Answer of create endpoints for resources without a key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatedResource {
    pub id: Option<i64>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

/// Answer of create endpoints for keyed resources (test cases, cycles, plans, executions).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyedCreatedResource {
    pub id: Option<i64>,
    pub key: Option<String>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

macro_rules! api_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every accepted value, in wire form.
            pub const ALL: &'static [&'static str] = &[$($wire),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "invalid value '{}', expected one of: {}",
                        s,
                        Self::ALL.join(", ")
                    )),
                }
            }
        }
    };
}

api_enum! {
    /// Library a folder belongs to.
    FolderType {
        TestCase => "TEST_CASE",
        TestPlan => "TEST_PLAN",
        TestCycle => "TEST_CYCLE",
    }
}

api_enum! {
    /// Entity kind a status applies to.
    StatusType {
        TestCase => "TEST_CASE",
        TestPlan => "TEST_PLAN",
        TestCycle => "TEST_CYCLE",
        TestExecution => "TEST_EXECUTION",
    }
}

api_enum! {
    /// How new test steps combine with existing ones.
    StepMode {
        Append => "APPEND",
        Overwrite => "OVERWRITE",
    }
}
