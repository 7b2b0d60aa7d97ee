use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{value:?} is not a valid {kind}")]
pub struct ParseEnumError {
	pub kind: &'static str,
	pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
	Pending,
	InProgress,
	Completed,
	Overdue,
}

impl TaskStatus {
	pub const ALL: [TaskStatus; 4] = [
		TaskStatus::Pending,
		TaskStatus::InProgress,
		TaskStatus::Completed,
		TaskStatus::Overdue,
	];

	pub fn label(self) -> &'static str {
		match self {
			TaskStatus::Pending => "pending",
			TaskStatus::InProgress => "in-progress",
			TaskStatus::Completed => "completed",
			TaskStatus::Overdue => "overdue",
		}
	}
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for TaskStatus {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pending" => Ok(TaskStatus::Pending),
			"in-progress" => Ok(TaskStatus::InProgress),
			"completed" => Ok(TaskStatus::Completed),
			"overdue" => Ok(TaskStatus::Overdue),
			_ => Err(ParseEnumError { kind: "task status", value: s.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
	Low,
	Medium,
	High,
}

impl TaskPriority {
	pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

	pub fn label(self) -> &'static str {
		match self {
			TaskPriority::Low => "low",
			TaskPriority::Medium => "medium",
			TaskPriority::High => "high",
		}
	}
}

impl fmt::Display for TaskPriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for TaskPriority {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"low" => Ok(TaskPriority::Low),
			"medium" => Ok(TaskPriority::Medium),
			"high" => Ok(TaskPriority::High),
			_ => Err(ParseEnumError { kind: "task priority", value: s.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
	Work,
	Personal,
	Meeting,
	Event,
	Other,
}

impl TaskCategory {
	pub const ALL: [TaskCategory; 5] = [
		TaskCategory::Work,
		TaskCategory::Personal,
		TaskCategory::Meeting,
		TaskCategory::Event,
		TaskCategory::Other,
	];

	pub fn label(self) -> &'static str {
		match self {
			TaskCategory::Work => "work",
			TaskCategory::Personal => "personal",
			TaskCategory::Meeting => "meeting",
			TaskCategory::Event => "event",
			TaskCategory::Other => "other",
		}
	}
}

impl fmt::Display for TaskCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for TaskCategory {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"work" => Ok(TaskCategory::Work),
			"personal" => Ok(TaskCategory::Personal),
			"meeting" => Ok(TaskCategory::Meeting),
			"event" => Ok(TaskCategory::Event),
			"other" => Ok(TaskCategory::Other),
			_ => Err(ParseEnumError { kind: "task category", value: s.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>, // URL in exported JSON; the UI falls back to the initial
}

impl User {
	pub fn initial(&self) -> char {
		self.name.chars().next().unwrap_or('?')
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
	pub id: String,
	pub title: String,
	pub description: String,
	pub assignee: User,
	pub due_date: DateTime<Local>,
	pub created_at: DateTime<Local>,
	pub status: TaskStatus,
	pub priority: TaskPriority,
	pub category: TaskCategory,
	pub progress: u8, // 0-100
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
	User,
	Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
	pub id: String,
	pub content: String,
	pub sender: ChatSender,
	pub timestamp: DateTime<Local>,
}

impl ChatMessage {
	pub fn new(id: impl Into<String>, sender: ChatSender, content: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			content: content.into(),
			sender,
			timestamp: Local::now(),
		}
	}

	pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
		self.timestamp = timestamp;
		self
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	pub tasks_completed: usize,
	pub tasks_in_progress: usize,
	pub tasks_pending: usize,
	pub tasks_overdue: usize,
	pub completion_rate: u8, // rounded percentage, 0-100
}

impl DashboardStats {
	pub fn total(&self) -> usize {
		self.tasks_completed + self.tasks_in_progress + self.tasks_pending + self.tasks_overdue
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_status_wire_spelling_is_kebab_case() {
		let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
		assert_eq!(json, "\"in-progress\"");
		let back: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
		assert_eq!(back, TaskStatus::InProgress);
	}

	#[test]
	fn test_sender_wire_spelling_is_lowercase() {
		assert_eq!(serde_json::to_string(&ChatSender::Ai).unwrap(), "\"ai\"");
		assert_eq!(serde_json::to_string(&ChatSender::User).unwrap(), "\"user\"");
	}

	#[test]
	fn test_enum_from_str_round_trips_labels() {
		for status in TaskStatus::ALL {
			assert_eq!(status.label().parse::<TaskStatus>().unwrap(), status);
		}
		for priority in TaskPriority::ALL {
			assert_eq!(priority.label().parse::<TaskPriority>().unwrap(), priority);
		}
		for category in TaskCategory::ALL {
			assert_eq!(category.label().parse::<TaskCategory>().unwrap(), category);
		}
	}

	#[test]
	fn test_from_str_ignores_case_and_rejects_unknown() {
		assert_eq!("HIGH".parse::<TaskPriority>().unwrap(), TaskPriority::High);
		assert_eq!("In-Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
		let err = "critical".parse::<TaskPriority>().unwrap_err();
		assert_eq!(err.kind, "task priority");
		assert_eq!(err.value, "critical");
	}

	#[test]
	fn test_task_json_uses_camel_case_keys() {
		let task = Task {
			id: "task-1".to_string(),
			title: "Update website design".to_string(),
			description: "Refresh the landing page".to_string(),
			assignee: User {
				id: "user-1".to_string(),
				name: "John Doe".to_string(),
				avatar: None,
			},
			due_date: Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
			created_at: Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
			status: TaskStatus::InProgress,
			priority: TaskPriority::High,
			category: TaskCategory::Work,
			progress: 40,
			tags: Some(vec!["design".to_string(), "urgent".to_string()]),
		};
		let json = serde_json::to_string(&task).unwrap();
		assert!(json.contains("\"dueDate\""));
		assert!(json.contains("\"createdAt\""));
		assert!(json.contains("\"status\":\"in-progress\""));
		assert!(!json.contains("\"due_date\""));
		let back: Task = serde_json::from_str(&json).unwrap();
		assert_eq!(back, task);
	}

	#[test]
	fn test_task_tags_and_avatar_are_optional_on_input() {
		let json = r#"{
			"id": "task-9",
			"title": "Review customer feedback",
			"description": "",
			"assignee": {"id": "user-2", "name": "Jane Smith"},
			"dueDate": "2024-03-10T00:00:00+00:00",
			"createdAt": "2024-03-01T00:00:00+00:00",
			"status": "pending",
			"priority": "low",
			"category": "other",
			"progress": 0
		}"#;
		let task: Task = serde_json::from_str(json).unwrap();
		assert_eq!(task.tags, None);
		assert_eq!(task.assignee.avatar, None);
		assert_eq!(task.assignee.initial(), 'J');
	}

	#[test]
	fn test_stats_wire_shape_and_total() {
		let stats = DashboardStats {
			tasks_completed: 3,
			tasks_in_progress: 4,
			tasks_pending: 5,
			tasks_overdue: 3,
			completion_rate: 20,
		};
		assert_eq!(stats.total(), 15);
		let json = serde_json::to_string(&stats).unwrap();
		assert!(json.contains("\"tasksCompleted\":3"));
		assert!(json.contains("\"completionRate\":20"));
	}
}
