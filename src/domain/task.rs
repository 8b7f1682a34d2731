use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse priority from a CLI argument like "high"
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Weather conditions captured when an outdoor task is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Temperature in degrees Celsius
    pub temp: f64,
    /// Condition text, e.g. "Partly cloudy"
    pub condition: String,
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id, derived from creation time (millis since epoch)
    pub id: String,
    /// Task title, trimmed of surrounding whitespace
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// When the task was created; never changes afterwards
    pub created_at: DateTime<Local>,
    pub is_important: bool,
    /// Weather snapshot attached at creation for outdoor tasks, never refreshed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
}

impl Task {
    pub fn new(id: String, title: String, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Self {
            id,
            title,
            completed: false,
            priority,
            due_date,
            created_at: Local::now(),
            is_important: false,
            weather: None,
        }
    }
}

/// Substrings that mark a task as weather-sensitive
const OUTDOOR_KEYWORDS: [&str; 4] = ["outdoor", "outside", "walk", "run"];

/// Check whether a title should trigger a weather lookup
pub fn is_outdoor_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    OUTDOOR_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
