//! Task collection utilities: aggregate statistics, calendar lookups,
//! presentation classifiers, and the sample-data generator that seeds the
//! dashboard on startup.

use crate::model::{DashboardStats, Task, TaskCategory, TaskPriority, TaskStatus, User};
use chrono::{DateTime, Duration, Local, NaiveDate};
use rand::Rng;
use ratatui::style::{Color, Modifier, Style};
use slug::slugify;

const SAMPLE_TITLES: [&str; 15] = [
    "Update website design",
    "Prepare quarterly report",
    "Client meeting preparation",
    "Research new technologies",
    "Team training session",
    "Content marketing review",
    "Software bug fixes",
    "Create user documentation",
    "Social media campaign",
    "Mobile app feature implementation",
    "Review customer feedback",
    "Internal process optimization",
    "Product launch planning",
    "Security protocol update",
    "Quality assurance testing",
];

const SAMPLE_DESCRIPTIONS: [&str; 10] = [
    "Complete this task with attention to detail and within the deadline.",
    "Collaborate with the team to ensure all requirements are met.",
    "This is a high-visibility project that needs careful planning.",
    "Follow up with stakeholders for additional information if needed.",
    "Review previous similar projects for reference before starting.",
    "Document all progress and update the status regularly.",
    "Coordinate with other departments as necessary.",
    "Prepare a summary of outcomes after completion.",
    "Check quality standards before marking as complete.",
    "Allocate sufficient time for revisions and improvements.",
];

const SAMPLE_TAGS: [&str; 13] = [
    "urgent",
    "design",
    "development",
    "marketing",
    "finance",
    "hr",
    "meeting",
    "client",
    "internal",
    "backend",
    "frontend",
    "planning",
    "research",
];

/// The fixed roster tasks get assigned to.
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: "user-1".to_string(),
            name: "John Doe".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
        },
        User {
            id: "user-2".to_string(),
            name: "Jane Smith".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=2".to_string()),
        },
        User {
            id: "user-3".to_string(),
            name: "Robert Johnson".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=3".to_string()),
        },
        User {
            id: "user-4".to_string(),
            name: "Emily Davis".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=4".to_string()),
        },
    ]
}

/// Generate `count` plausible tasks around the current date.
pub fn sample_tasks(count: usize) -> Vec<Task> {
    sample_tasks_with(&mut rand::rng(), count)
}

/// Deterministic variant for seeded generation. Titles rotate through a fixed
/// pool; dates land within a month of now; progress agrees with status
/// (completed is 100, pending is 0, the rest fall in between).
pub fn sample_tasks_with(rng: &mut impl Rng, count: usize) -> Vec<Task> {
    let users = sample_users();
    let now = Local::now();

    (0..count)
        .map(|i| {
            let created_at = now - Duration::days(rng.random_range(0..30i64));
            let due_date = created_at + Duration::days(rng.random_range(1..=14i64));
            let status = TaskStatus::ALL[rng.random_range(0..TaskStatus::ALL.len())];
            let progress: u8 = match status {
                TaskStatus::Completed => 100,
                TaskStatus::Overdue => rng.random_range(0..90),
                TaskStatus::InProgress => rng.random_range(10..90),
                TaskStatus::Pending => 0,
            };
            Task {
                id: format!("task-{}", i + 1),
                title: SAMPLE_TITLES[i % SAMPLE_TITLES.len()].to_string(),
                description: SAMPLE_DESCRIPTIONS[rng.random_range(0..SAMPLE_DESCRIPTIONS.len())]
                    .to_string(),
                assignee: users[rng.random_range(0..users.len())].clone(),
                due_date,
                created_at,
                status,
                priority: TaskPriority::ALL[rng.random_range(0..TaskPriority::ALL.len())],
                category: TaskCategory::ALL[rng.random_range(0..TaskCategory::ALL.len())],
                progress,
                tags: Some(sample_tags(rng)),
            }
        })
        .collect()
}

// Up to three draws from the pool, duplicates dropped, so a task carries
// between one and three distinct tags.
fn sample_tags(rng: &mut impl Rng) -> Vec<String> {
    let draws = rng.random_range(1..=3usize);
    let mut tags: Vec<String> = Vec::new();
    for _ in 0..draws {
        let tag = SAMPLE_TAGS[rng.random_range(0..SAMPLE_TAGS.len())];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Derive a unique task id from the title. Falls back to a plain counter
/// suffix when the slug collides with an existing id.
pub fn unique_task_id(title: &str, existing: &[Task]) -> String {
    let mut base = slugify(title);
    base.truncate(40); // slugs are ascii, safe to cut at a byte boundary
    if base.is_empty() {
        base = "task".to_string();
    }
    let mut id = format!("task-{base}");
    let mut counter = 1;
    while existing.iter().any(|t| t.id == id) {
        counter += 1;
        id = format!("task-{base}-{counter}");
    }
    id
}

/// Count tasks per status and compute the rounded completion percentage.
/// An empty collection reports a rate of 0 rather than dividing by zero.
pub fn dashboard_stats(tasks: &[Task]) -> DashboardStats {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
    let tasks_completed = count(TaskStatus::Completed);
    let completion_rate = if tasks.is_empty() {
        0
    } else {
        ((tasks_completed as f64 / tasks.len() as f64) * 100.0).round() as u8
    };
    DashboardStats {
        tasks_completed,
        tasks_in_progress: count(TaskStatus::InProgress),
        tasks_pending: count(TaskStatus::Pending),
        tasks_overdue: count(TaskStatus::Overdue),
        completion_rate,
    }
}

/// Tasks due on the given calendar day, time of day ignored, input order kept.
pub fn tasks_on_date<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.due_date.date_naive() == date)
        .collect()
}

/// Whole days from `from` to `to`; negative when `to` is in the past.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Days until the due date, measured midnight to midnight so a task due
/// later today still reports 0.
pub fn days_remaining(due: DateTime<Local>) -> i64 {
    days_between(Local::now().date_naive(), due.date_naive())
}

/// Long form for the detail pane: either the absolute date or how late it is.
pub fn due_label(task: &Task) -> String {
    let days = days_remaining(task.due_date);
    if days < 0 {
        let n = -days;
        format!("Overdue by {} day{}", n, if n == 1 { "" } else { "s" })
    } else {
        format!("Due: {}", format_date(task.due_date))
    }
}

/// Short relative form for list rows.
pub fn due_hint(due: DateTime<Local>) -> String {
    let days = days_remaining(due);
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        2..=7 => format!("in {}d", days),
        _ if days < 0 => format!("{}d late", -days),
        _ => due.format("%b %-d").to_string(),
    }
}

pub fn format_date(ts: DateTime<Local>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Case-insensitive substring match over title, description, and assignee
/// name. A blank query matches everything.
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task.assignee.name.to_lowercase().contains(&needle)
}

/// The next `limit` tasks ordered by due date, earliest first.
pub fn upcoming<'a>(tasks: &'a [Task], limit: usize) -> Vec<&'a Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.due_date);
    sorted.truncate(limit);
    sorted
}

/// Work and meeting tasks are the slice the team view cares about.
pub fn is_team_task(task: &Task) -> bool {
    matches!(task.category, TaskCategory::Work | TaskCategory::Meeting)
}

pub fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => Color::Green,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::Overdue => Color::Red,
    }
}

pub fn category_icon(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::Work => "💼",
        TaskCategory::Personal => "👤",
        TaskCategory::Meeting => "👥",
        TaskCategory::Event => "🎉",
        TaskCategory::Other => "📋",
    }
}

/// Status badge for list rows. `style` comes straight from config, so any
/// unrecognized value falls back to the unicode set.
pub fn status_indicator(status: TaskStatus, style: &str) -> (&'static str, Style) {
    match style {
        "emoji" => match status {
            TaskStatus::Pending => ("🟡", Style::default()),
            TaskStatus::InProgress => ("🔵", Style::default()),
            TaskStatus::Completed => ("✅", Style::default()),
            TaskStatus::Overdue => ("🔴", Style::default()),
        },
        "text" => match status {
            TaskStatus::Pending => ("[todo]", Style::default().fg(Color::Yellow)),
            TaskStatus::InProgress => (
                "[prog]",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            TaskStatus::Completed => ("[done]", Style::default().fg(Color::Green)),
            TaskStatus::Overdue => (
                "[LATE]",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
        },
        _ => match status {
            TaskStatus::Pending => ("○", Style::default().fg(Color::Yellow)),
            TaskStatus::InProgress => (
                "▶",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            TaskStatus::Completed => ("✓", Style::default().fg(Color::Green)),
            TaskStatus::Overdue => (
                "●",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        },
    }
}

/// Plain-text progress bar for the detail pane.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let clamped = progress.min(100) as usize;
    let filled = clamped * width / 100;
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        clamped
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            assignee: User {
                id: "user-1".to_string(),
                name: "John Doe".to_string(),
                avatar: None,
            },
            due_date: Local::now(),
            created_at: Local::now(),
            status,
            priority: TaskPriority::Medium,
            category: TaskCategory::Work,
            progress: 0,
            tags: None,
        }
    }

    fn due_at(mut task: Task, y: i32, m: u32, d: u32, hour: u32) -> Task {
        task.due_date = Local.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap();
        task
    }

    #[test]
    fn test_stats_counts_by_status() {
        let tasks = vec![
            fixture("a", TaskStatus::Completed),
            fixture("b", TaskStatus::InProgress),
            fixture("c", TaskStatus::InProgress),
            fixture("d", TaskStatus::Pending),
            fixture("e", TaskStatus::Overdue),
        ];
        let stats = dashboard_stats(&tasks);
        assert_eq!(stats.tasks_completed, 1);
        assert_eq!(stats.tasks_in_progress, 2);
        assert_eq!(stats.tasks_pending, 1);
        assert_eq!(stats.tasks_overdue, 1);
        assert_eq!(stats.total(), 5);
        assert_eq!(stats.completion_rate, 20);
    }

    #[test]
    fn test_stats_empty_collection_has_zero_rate() {
        let stats = dashboard_stats(&[]);
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn test_stats_rate_rounds_to_nearest() {
        // 2 of 3 completed is 66.67%, rounds to 67
        let tasks = vec![
            fixture("a", TaskStatus::Completed),
            fixture("b", TaskStatus::Completed),
            fixture("c", TaskStatus::Pending),
        ];
        assert_eq!(dashboard_stats(&tasks).completion_rate, 67);
    }

    #[test]
    fn test_tasks_on_date_ignores_time_of_day() {
        let tasks = vec![
            due_at(fixture("early", TaskStatus::Pending), 2024, 3, 5, 0),
            due_at(fixture("late", TaskStatus::Pending), 2024, 3, 5, 23),
            due_at(fixture("other", TaskStatus::Pending), 2024, 3, 6, 12),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let hits = tasks_on_date(&tasks, day);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "early");
        assert_eq!(hits[1].id, "late");
    }

    #[test]
    fn test_days_between_signs() {
        let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(days_between(base, next), 1);
        assert_eq!(days_between(base, leap_day), -1);
        assert_eq!(days_between(base, base), 0);
    }

    #[test]
    fn test_days_remaining_today_is_zero() {
        assert_eq!(days_remaining(Local::now()), 0);
    }

    #[test]
    fn test_due_label_pluralizes_overdue_days() {
        let mut task = fixture("late", TaskStatus::Overdue);
        task.due_date = Local::now() - Duration::days(1);
        assert_eq!(due_label(&task), "Overdue by 1 day");
        task.due_date = Local::now() - Duration::days(3);
        assert_eq!(due_label(&task), "Overdue by 3 days");
    }

    #[test]
    fn test_matches_query_spans_title_description_assignee() {
        let mut task = fixture("a", TaskStatus::Pending);
        task.title = "Update website design".to_string();
        task.description = "Refresh the landing page".to_string();
        assert!(matches_query(&task, "WEBSITE"));
        assert!(matches_query(&task, "landing"));
        assert!(matches_query(&task, "john"));
        assert!(matches_query(&task, ""));
        assert!(matches_query(&task, "   "));
        assert!(!matches_query(&task, "budget"));
    }

    #[test]
    fn test_upcoming_sorts_by_due_date_and_limits() {
        let tasks = vec![
            due_at(fixture("c", TaskStatus::Pending), 2030, 3, 10, 9),
            due_at(fixture("a", TaskStatus::Pending), 2030, 3, 1, 9),
            due_at(fixture("b", TaskStatus::Pending), 2030, 3, 5, 9),
        ];
        let next = upcoming(&tasks, 2);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "a");
        assert_eq!(next[1].id, "b");
    }

    #[test]
    fn test_is_team_task_keeps_work_and_meeting_only() {
        let mut personal = fixture("p", TaskStatus::Pending);
        personal.category = TaskCategory::Personal;
        let mut meeting = fixture("m", TaskStatus::Pending);
        meeting.category = TaskCategory::Meeting;
        let work = fixture("w", TaskStatus::Pending);
        assert!(!is_team_task(&personal));
        assert!(is_team_task(&meeting));
        assert!(is_team_task(&work));
        let mut event = fixture("e", TaskStatus::Pending);
        event.category = TaskCategory::Event;
        assert!(!is_team_task(&event));
    }

    #[test]
    fn test_status_indicator_unknown_style_falls_back_to_unicode() {
        for status in TaskStatus::ALL {
            assert_eq!(
                status_indicator(status, "fancy"),
                status_indicator(status, "unicode")
            );
        }
    }

    #[test]
    fn test_progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░ 0%");
        assert_eq!(progress_bar(50, 10), "█████░░░░░ 50%");
        assert_eq!(progress_bar(100, 10), "██████████ 100%");
        // out-of-range input clamps instead of overflowing the bar
        assert_eq!(progress_bar(250, 10), "██████████ 100%");
    }

    #[test]
    fn test_sample_tasks_shape_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let tasks = sample_tasks_with(&mut rng, 20);
        assert_eq!(tasks.len(), 20);
        assert_eq!(tasks[0].title, SAMPLE_TITLES[0]);
        assert_eq!(tasks[15].title, SAMPLE_TITLES[0]); // titles rotate past the pool
        for task in &tasks {
            assert!(task.due_date > task.created_at);
            match task.status {
                TaskStatus::Completed => assert_eq!(task.progress, 100),
                TaskStatus::Pending => assert_eq!(task.progress, 0),
                TaskStatus::InProgress => assert!((10..90).contains(&task.progress)),
                TaskStatus::Overdue => assert!(task.progress < 90),
            }
            let tags = task.tags.as_ref().unwrap();
            assert!((1..=3).contains(&tags.len()));
        }
        let mut ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_sample_tasks_seeded_is_deterministic() {
        let a = sample_tasks_with(&mut StdRng::seed_from_u64(42), 10);
        let b = sample_tasks_with(&mut StdRng::seed_from_u64(42), 10);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.status, y.status);
            assert_eq!(x.progress, y.progress);
            assert_eq!(x.assignee.id, y.assignee.id);
            assert_eq!(x.tags, y.tags);
        }
    }

    #[test]
    fn test_unique_task_id_slugs_and_uniquifies() {
        let existing = vec![fixture("task-fix-login-bug", TaskStatus::Pending)];
        assert_eq!(unique_task_id("Fix Login Bug", &[]), "task-fix-login-bug");
        assert_eq!(
            unique_task_id("Fix Login Bug", &existing),
            "task-fix-login-bug-2"
        );
        assert_eq!(unique_task_id("!!!", &[]), "task-task");
    }
}
