//! Rule-based assistant: keyword-matched canned replies plus a few small
//! heuristics for deadlines and categories. Everything here is deterministic
//! string matching against fixed tables; there is no model behind it.

use crate::model::{ChatMessage, ChatSender, Task, TaskCategory, TaskPriority, TaskStatus};
use chrono::{Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const FALLBACK_REPLY: &str = "I understand you need assistance with task management. Could you provide more details about what you need help with?";

/// Shown when a reply cannot be produced for a submitted message.
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

fn rule<T>(pattern: &str, value: T) -> (Regex, T) {
    // Unanchored and case-insensitive, so keywords match inside words the
    // same way a substring check would ("finished" hits "finish").
    (Regex::new(&format!("(?i){pattern}")).unwrap(), value)
}

// Order matters: the first matching rule wins.
static RESPONSE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"hello|hi", "Hello! How can I help you with your tasks today?"),
        rule(
            r"create|add|new task",
            "I can help you create a new task. What should be the title of the task?",
        ),
        rule(
            r"deadline|due date",
            "When would you like this task to be completed? Please specify a date.",
        ),
        rule(r"assign|who", "Who would you like to assign this task to?"),
        rule(
            r"progress|status",
            "I can check the progress of your tasks. Currently, you have several tasks in progress with varying completion rates.",
        ),
        rule(
            r"priority",
            "Would you like to set this as a high, medium, or low priority task?",
        ),
        rule(
            r"category",
            "What category would you like to assign to this task? Options include work, personal, meeting, event, or other.",
        ),
        rule(
            r"completed|finished",
            "Great job! Would you like me to mark this task as completed?",
        ),
        rule(
            r"overdue",
            "I notice you have some overdue tasks. Would you like me to help you reschedule them?",
        ),
        rule(
            r"recommend|suggest",
            "Based on your current workload, I recommend focusing on high priority tasks first, particularly those with approaching deadlines.",
        ),
        rule(
            r"help",
            "I can help you create tasks, assign deadlines, track progress, and manage your schedule. Just tell me what you need!",
        ),
    ]
});

static CATEGORY_RULES: Lazy<Vec<(Regex, TaskCategory)>> = Lazy::new(|| {
    vec![
        rule(r"meet|call|discuss", TaskCategory::Meeting),
        rule(r"plan|organize|event", TaskCategory::Event),
        rule(r"personal|home|family", TaskCategory::Personal),
        rule(r"project|client|report", TaskCategory::Work),
    ]
});

static URGENT_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)urgent|asap").unwrap());
static PLANNING_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)plan|research").unwrap());

/// Canned reply for a user message. Rules are scanned top to bottom and the
/// first hit wins; anything unmatched gets the generic fallback.
pub fn respond(input: &str) -> &'static str {
    for (pattern, reply) in RESPONSE_RULES.iter() {
        if pattern.is_match(input) {
            return reply;
        }
    }
    FALLBACK_REPLY
}

/// Days from today to the suggested due date. Higher priority means a
/// shorter runway; urgency words tighten it further and planning words
/// stretch it. Never less than one day out.
pub fn deadline_offset_days(title: &str, description: &str, priority: TaskPriority) -> i64 {
    let mut days: i64 = match priority {
        TaskPriority::High => 3,
        TaskPriority::Medium => 5,
        TaskPriority::Low => 7,
    };
    let combined = format!("{title} {description}");
    if URGENT_WORDS.is_match(&combined) {
        days = (days - 2).max(1);
    } else if PLANNING_WORDS.is_match(&combined) {
        days += 2;
    }
    days
}

pub fn suggest_deadline(title: &str, description: &str, priority: TaskPriority) -> NaiveDate {
    Local::now().date_naive() + Duration::days(deadline_offset_days(title, description, priority))
}

/// Guess a category from the draft text. First matching rule wins; text
/// with no recognizable keywords lands in Other.
pub fn suggest_category(title: &str, description: &str) -> TaskCategory {
    let combined = format!("{title} {description}");
    for (pattern, category) in CATEGORY_RULES.iter() {
        if pattern.is_match(&combined) {
            return *category;
        }
    }
    TaskCategory::Other
}

/// One-line reading of the current workload, worst finding first.
pub fn workload_insight(tasks: &[Task]) -> &'static str {
    if tasks.is_empty() {
        return "No tasks to analyze.";
    }
    let total = tasks.len() as f64;
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count() as f64;
    let high = tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::High)
        .count() as f64;

    if count(TaskStatus::Overdue) > total * 0.2 {
        "I notice you have several overdue tasks. Consider rescheduling or breaking them into smaller subtasks."
    } else if count(TaskStatus::Completed) < total * 0.3 {
        "Your task completion rate is below average. Focus on completing smaller tasks first to build momentum."
    } else if high > total * 0.5 {
        "You have many high priority tasks. Consider re-evaluating priorities to prevent burnout."
    } else {
        "Your task management looks good! Keep up the consistent progress."
    }
}

/// The conversation the assistant tab opens with.
pub fn seed_history() -> Vec<ChatMessage> {
    let now = Local::now();
    let seed: [(&str, ChatSender, &str, i64); 5] = [
        (
            "1",
            ChatSender::Ai,
            "Hello! I'm your AI assistant. How can I help you with task management today?",
            5,
        ),
        (
            "2",
            ChatSender::User,
            "Hi! I need to create a new task for the website redesign project.",
            4,
        ),
        (
            "3",
            ChatSender::Ai,
            "Sure, I can help with that. What should be the title and description of this task?",
            3,
        ),
        (
            "4",
            ChatSender::User,
            "Title should be \"Update website homepage\" and it's about implementing the new design we approved last week.",
            2,
        ),
        (
            "5",
            ChatSender::Ai,
            "Got it. This sounds like a high priority work task. Would you like me to set a deadline for next Friday and assign it to John?",
            1,
        ),
    ];
    seed.into_iter()
        .map(|(id, sender, content, minutes_ago)| {
            ChatMessage::new(id, sender, content).with_timestamp(now - Duration::minutes(minutes_ago))
        })
        .collect()
}
