use super::task::Task;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Named view over the task collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Today,
    Important,
    Planned,
    /// No assignment model exists; this view is always empty
    Assigned,
}

impl Filter {
    /// Parse a filter from a CLI argument
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "today" => Some(Self::Today),
            "important" => Some(Self::Important),
            "planned" => Some(Self::Planned),
            "assigned" => Some(Self::Assigned),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Important => "important",
            Self::Planned => "planned",
            Self::Assigned => "assigned",
        }
    }
}

/// Select the tasks visible under the given filter, preserving order.
///
/// `now` fixes the "today" boundary at local midnight so the result is
/// deterministic for a given reference time.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: Filter, now: DateTime<Local>) -> Vec<&'a Task> {
    match filter {
        Filter::All => tasks.iter().collect(),
        Filter::Today => {
            let start_of_day = now.date_naive();
            tasks
                .iter()
                .filter(|t| t.created_at.date_naive() >= start_of_day)
                .collect()
        }
        Filter::Important => tasks.iter().filter(|t| t.is_important).collect(),
        Filter::Planned => tasks.iter().filter(|t| t.due_date.is_some()).collect(),
        Filter::Assigned => Vec::new(),
    }
}

/// Partition a filtered view into (incomplete, completed), each keeping
/// the original relative order.
pub fn partition_completed<'a>(tasks: &[&'a Task]) -> (Vec<&'a Task>, Vec<&'a Task>) {
    tasks.iter().partition(|t| !t.completed)
}
