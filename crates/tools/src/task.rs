//! Task planning facade.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Facade;

/// Actions of the `task_planning` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params")]
pub enum Task {
    #[serde(rename = "create_task")]
    Create {
        title: String,
        description: String,
        project: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<Priority>,
    },

    #[serde(rename = "update_task")]
    Update {
        task_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<Status>,
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<Priority>,
    },

    #[serde(rename = "get_task")]
    Get { task_id: String },

    #[serde(rename = "search_tasks")]
    Search { query: String },
}

impl Facade for Task {
    const METHOD: &'static str = "task_planning";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    NotStarted,
    InProgress,
    Blocked,
    Completed,
    Cancelled,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!(
                "unknown priority '{s}' (expected low, medium, high or critical)"
            )),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "notstarted" => Ok(Status::NotStarted),
            "inprogress" => Ok(Status::InProgress),
            "blocked" => Ok(Status::Blocked),
            "completed" => Ok(Status::Completed),
            "cancelled" => Ok(Status::Cancelled),
            _ => Err(format!(
                "unknown status '{s}' (expected not-started, in-progress, blocked, completed or cancelled)"
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_priority_and_status() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("not_started".parse::<Status>().unwrap(), Status::NotStarted);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn create_task_request() {
        let req = Task::Create {
            title: "Write docs".to_string(),
            description: "README".to_string(),
            project: "client".to_string(),
            priority: Some(Priority::Critical),
        }
        .into_request().unwrap();

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "method": "task_planning",
                "params": {
                    "action": "create_task",
                    "params": {
                        "title": "Write docs",
                        "description": "README",
                        "project": "client",
                        "priority": "Critical"
                    }
                }
            })
        );
    }

    #[test]
    fn update_task_omits_unset_fields() {
        let req = Task::Update {
            task_id: "t-1".to_string(),
            status: Some(Status::Completed),
            priority: None,
        }
        .into_request().unwrap();

        assert_eq!(
            req.params["params"],
            json!({"task_id": "t-1", "status": "Completed"})
        );
    }
}
