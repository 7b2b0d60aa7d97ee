mod assistant;
mod calendar;
mod config;
mod model;
mod tasks;

use anyhow::{Context, Result};
use assistant::{
	respond, seed_history, suggest_category, suggest_deadline, workload_insight, ERROR_REPLY,
};
use calendar::{
	has_due, month_grid, month_title, next_month, parse_day_input, prev_month, WEEKDAY_HEADER,
};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
	event::{self, Event, KeyCode, KeyEventKind},
	execute,
	terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use model::{ChatMessage, ChatSender, Task, TaskCategory, TaskPriority, TaskStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
	prelude::*,
	text::{Line, Text},
	widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::time::{Duration, Instant};
use tasks::{
	category_icon, dashboard_stats, days_remaining, due_hint, due_label, format_date,
	is_team_task, matches_query, priority_color, progress_bar, sample_tasks, sample_tasks_with,
	sample_users, status_color, status_indicator, tasks_on_date, unique_task_id, upcoming,
};

const UPCOMING_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "zenith")]
#[command(about = "Terminal dashboard for task management")]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a freshly generated sample task collection as JSON
	Tasks {
		/// Number of tasks to generate (defaults to config sample_tasks)
		#[arg(long)]
		count: Option<usize>,
		/// Seed for reproducible output
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Print aggregate statistics for a generated collection as JSON
	Stats {
		/// Number of tasks to generate (defaults to config sample_tasks)
		#[arg(long)]
		count: Option<usize>,
		/// Seed for reproducible output
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Suggest a due date and category for a task draft, as JSON
	Suggest {
		/// Task title to analyze
		#[arg(long)]
		title: String,
		/// Optional longer description
		#[arg(long, default_value = "")]
		description: String,
		/// low, medium, or high
		#[arg(long, default_value = "medium")]
		priority: TaskPriority,
	},
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
	due_date: NaiveDate,
	category: TaskCategory,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let cfg = config::load_or_init().context("failed to load config")?;

	match cli.command {
		Some(Commands::Tasks { count, seed }) => {
			let collection = sample_collection(&cfg, count, seed);
			println!("{}", serde_json::to_string_pretty(&collection)?);
			Ok(())
		}
		Some(Commands::Stats { count, seed }) => {
			let collection = sample_collection(&cfg, count, seed);
			println!("{}", serde_json::to_string_pretty(&dashboard_stats(&collection))?);
			Ok(())
		}
		Some(Commands::Suggest {
			title,
			description,
			priority,
		}) => {
			let suggestion = Suggestion {
				due_date: suggest_deadline(&title, &description, priority),
				category: suggest_category(&title, &description),
			};
			println!("{}", serde_json::to_string_pretty(&suggestion)?);
			Ok(())
		}
		None => run_tui(&cfg),
	}
}

fn sample_collection(cfg: &Config, count: Option<usize>, seed: Option<u64>) -> Vec<Task> {
	let count = count.unwrap_or(cfg.general.sample_tasks);
	match seed {
		Some(seed) => sample_tasks_with(&mut StdRng::seed_from_u64(seed), count),
		None => sample_tasks(count),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
	Dashboard,
	Calendar,
	Team,
	Assistant,
}

impl Tab {
	const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Calendar, Tab::Team, Tab::Assistant];

	fn title(self) -> &'static str {
		match self {
			Tab::Dashboard => "Dashboard",
			Tab::Calendar => "Calendar",
			Tab::Team => "Team Tasks",
			Tab::Assistant => "Assistant",
		}
	}

	fn index(self) -> usize {
		Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
	}

	fn next(self) -> Tab {
		Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
	}

	fn prev(self) -> Tab {
		Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
	}
}

fn run_tui(cfg: &Config) -> Result<()> {
	enable_raw_mode()?;
	let mut stdout_handle = stdout();
	execute!(stdout_handle, EnterAlternateScreen)?;
	let backend = ratatui::backend::CrosstermBackend::new(stdout_handle);
	let mut terminal = ratatui::Terminal::new(backend)?;

	let users = sample_users();
	let mut all_tasks = sample_tasks(cfg.general.sample_tasks);
	let mut active_tab = Tab::Dashboard;
	// One browser selection per tab that shows the task list
	let mut dash_state = ListState::default();
	dash_state.select(Some(0));
	let mut team_state = ListState::default();
	team_state.select(Some(0));
	let mut search_query = String::new();
	let mut search_mode = false;
	let mut status_filter: Option<TaskStatus> = None;
	// Calendar
	let mut selected_date = Local::now().date_naive();
	let mut show_upcoming = false;
	// Assistant chat; replies resolve on a deadline to mimic a think-delay
	let mut messages = seed_history();
	let mut next_message_id: u64 = messages.len() as u64 + 1;
	let mut compose_mode = false;
	let mut compose_buf = String::new();
	let mut pending_reply: Option<(String, Instant)> = None;
	// New-task form
	// Fields: 0 = title, 1 = description, 2 = due, 3 = priority, 4 = category, 5 = assignee
	let mut form_open = false;
	let mut form_field: usize = 0;
	let mut form_title = String::new();
	let mut form_description = String::new();
	let mut form_due = String::new();
	let mut form_priority = TaskPriority::Medium;
	let mut form_category = TaskCategory::Work;
	let mut form_assignee: usize = 0;
	let mut pending_create: Option<(Task, Instant)> = None;
	let mut show_help = false;
	let mut status_message: Option<(String, Instant)> = None;
	// Status indicator style - can cycle with 's' key
	let styles = ["unicode", "emoji", "text"];
	let mut style_idx = styles
		.iter()
		.position(|s| *s == cfg.general.status_style)
		.unwrap_or(0);
	let reply_delay = Duration::from_millis(cfg.assistant.reply_delay_ms);
	let create_delay = Duration::from_millis(cfg.assistant.create_delay_ms);

	loop {
		// Status toasts expire after five seconds.
		if status_message
			.as_ref()
			.map(|(_, ts)| ts.elapsed() >= Duration::from_secs(5))
			.unwrap_or(false)
		{
			status_message = None;
		}

		// Deliver the assistant reply once its delay has elapsed.
		if pending_reply
			.as_ref()
			.map(|(_, due)| Instant::now() >= *due)
			.unwrap_or(false)
		{
			let reply = pending_reply
				.take()
				.map(|(query, _)| respond(&query))
				.unwrap_or(ERROR_REPLY);
			messages.push(ChatMessage::new(
				next_message_id.to_string(),
				ChatSender::Ai,
				reply,
			));
			next_message_id += 1;
		}

		// Land a submitted task once its processing delay has elapsed.
		if pending_create
			.as_ref()
			.map(|(_, due)| Instant::now() >= *due)
			.unwrap_or(false)
		{
			if let Some((task, _)) = pending_create.take() {
				status_message = Some((
					format!("New task \"{}\" assigned to {}", task.title, task.assignee.name),
					Instant::now(),
				));
				all_tasks.insert(0, task);
				dash_state.select(Some(0));
				form_open = false;
				form_field = 0;
				form_title.clear();
				form_description.clear();
				form_due.clear();
				form_priority = TaskPriority::Medium;
				form_category = TaskCategory::Work;
				form_assignee = 0;
			}
		}

		// Indices into all_tasks that survive the tab scope, search, and filter.
		let visible = visible_tasks(
			&all_tasks,
			active_tab == Tab::Team,
			&search_query,
			status_filter,
		);
		{
			let state = if active_tab == Tab::Team {
				&mut team_state
			} else {
				&mut dash_state
			};
			if visible.is_empty() {
				state.select(None);
			} else {
				match state.selected() {
					None => state.select(Some(0)),
					Some(sel) if sel >= visible.len() => state.select(Some(visible.len() - 1)),
					_ => {}
				}
			}
		}

		terminal.draw(|f| {
			let size = f.area();
			let current_style = styles[style_idx];
			let vertical = Layout::default()
				.direction(Direction::Vertical)
				.constraints(
					[
						Constraint::Length(2),
						Constraint::Min(3),
						Constraint::Length(2),
					]
					.as_ref(),
				)
				.split(size);

			// Tab header
			let mut header_spans: Vec<Span> = vec![Span::styled(
				" Task Zenith ",
				Style::default()
					.fg(Color::Magenta)
					.add_modifier(Modifier::BOLD),
			)];
			for (idx, tab) in Tab::ALL.iter().enumerate() {
				header_spans.push(Span::raw(" "));
				let style = if *tab == active_tab {
					Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
				} else {
					Style::default().fg(Color::DarkGray)
				};
				header_spans.push(Span::styled(format!(" {} {} ", idx + 1, tab.title()), style));
			}
			let header = Paragraph::new(Line::from(header_spans))
				.block(Block::default().borders(Borders::BOTTOM));
			f.render_widget(header, vertical[0]);

			let filter_label = status_filter.map(|s| s.label()).unwrap_or("all");
			let mut browser_title = format!("Tasks · {} ({})", filter_label, visible.len());
			if search_mode {
				browser_title = format!("{} · /{}█", browser_title, search_query);
			} else if !search_query.trim().is_empty() {
				browser_title = format!("{} · /{}", browser_title, search_query);
			}

			match active_tab {
				Tab::Dashboard => {
					let rows = Layout::default()
						.direction(Direction::Vertical)
						.constraints(
							[
								Constraint::Length(3),
								Constraint::Length(3),
								Constraint::Length(1),
								Constraint::Min(6),
							]
							.as_ref(),
						)
						.split(vertical[1]);

					let stats = dashboard_stats(&all_tasks);
					let cards = Layout::default()
						.direction(Direction::Horizontal)
						.constraints(
							[
								Constraint::Percentage(25),
								Constraint::Percentage(25),
								Constraint::Percentage(25),
								Constraint::Percentage(25),
							]
							.as_ref(),
						)
						.split(rows[0]);
					render_stat_card(f, cards[0], "Total Tasks", stats.total(), Color::White);
					render_stat_card(f, cards[1], "In Progress", stats.tasks_in_progress, Color::Blue);
					render_stat_card(f, cards[2], "Completed", stats.tasks_completed, Color::Green);
					render_stat_card(f, cards[3], "Overdue", stats.tasks_overdue, Color::Red);

					let gauge = Gauge::default()
						.block(Block::default().borders(Borders::ALL).title("Completion Rate"))
						.gauge_style(Style::default().fg(Color::Green))
						.ratio(f64::from(stats.completion_rate) / 100.0)
						.label(format!("{}%", stats.completion_rate));
					f.render_widget(gauge, rows[1]);

					let insight = Paragraph::new(Line::from(vec![
						Span::styled("◆ ", Style::default().fg(Color::Magenta)),
						Span::raw(workload_insight(&all_tasks)),
					]));
					f.render_widget(insight, rows[2]);

					render_task_browser(
						f,
						rows[3],
						&all_tasks,
						&visible,
						&mut dash_state,
						&browser_title,
						current_style,
					);
				}
				Tab::Team => {
					render_task_browser(
						f,
						vertical[1],
						&all_tasks,
						&visible,
						&mut team_state,
						&browser_title,
						current_style,
					);
				}
				Tab::Calendar => {
					if show_upcoming {
						let items: Vec<ListItem> = upcoming(&all_tasks, UPCOMING_LIMIT)
							.into_iter()
							.map(|t| task_row(t, current_style))
							.collect();
						let title = format!("Upcoming Tasks (next {}) · v to close", UPCOMING_LIMIT);
						let list = List::new(items)
							.block(Block::default().borders(Borders::ALL).title(title));
						f.render_widget(list, vertical[1]);
					} else {
						let panes = Layout::default()
							.direction(Direction::Horizontal)
							.constraints([Constraint::Length(25), Constraint::Min(20)].as_ref())
							.split(vertical[1]);

						let cal = Paragraph::new(Text::from(calendar_lines(&all_tasks, selected_date)))
							.block(
								Block::default()
									.borders(Borders::ALL)
									.title(month_title(selected_date)),
							);
						f.render_widget(cal, panes[0]);

						let day_tasks = tasks_on_date(&all_tasks, selected_date);
						let title = format!("Tasks for {}", selected_date.format("%B %-d, %Y"));
						if day_tasks.is_empty() {
							let empty = Paragraph::new("No tasks scheduled for this date")
								.style(Style::default().fg(Color::DarkGray))
								.block(Block::default().borders(Borders::ALL).title(title))
								.wrap(Wrap { trim: true });
							f.render_widget(empty, panes[1]);
						} else {
							let items: Vec<ListItem> = day_tasks
								.into_iter()
								.map(|t| task_row(t, current_style))
								.collect();
							let list = List::new(items)
								.block(Block::default().borders(Borders::ALL).title(title));
							f.render_widget(list, panes[1]);
						}
					}
				}
				Tab::Assistant => {
					let panes = Layout::default()
						.direction(Direction::Vertical)
						.constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
						.split(vertical[1]);

					// Wrap-aware line count keeps the transcript pinned to the bottom.
					let transcript =
						Paragraph::new(Text::from(chat_lines(&messages, pending_reply.is_some())))
							.block(Block::default().borders(Borders::ALL).title("AI Assistant"))
							.wrap(Wrap { trim: true });
					let view_height = panes[0].height.saturating_sub(2) as usize;
					let total_lines = transcript.line_count(panes[0].width.saturating_sub(2));
					let scroll = total_lines.saturating_sub(view_height);
					let transcript = transcript.scroll((scroll as u16, 0));
					f.render_widget(transcript, panes[0]);

					let (input_text, input_style) = if compose_mode {
						(format!("> {}█", compose_buf), Style::default())
					} else if pending_reply.is_some() {
						(
							"Waiting for the assistant to reply".to_string(),
							Style::default().fg(Color::DarkGray),
						)
					} else {
						(
							"Press Enter to write a message".to_string(),
							Style::default().fg(Color::DarkGray),
						)
					};
					let input_block = if compose_mode {
						Block::default()
							.borders(Borders::ALL)
							.title("Message (Enter send, Esc cancel)")
							.border_style(Style::default().fg(Color::Yellow))
					} else {
						Block::default().borders(Borders::ALL).title("Message")
					};
					let input = Paragraph::new(input_text).style(input_style).block(input_block);
					f.render_widget(input, panes[1]);
				}
			}

			// Footer
			let footer_main = if search_mode {
				format!("Search: {}█  (Enter keep, Esc clear)", search_query)
			} else {
				match active_tab {
					Tab::Dashboard | Tab::Team => browser_footer_text(size.width),
					Tab::Calendar => calendar_footer_text(size.width),
					Tab::Assistant => assistant_footer_text(size.width),
				}
			};
			let mut footer_lines = vec![footer_main];
			if let Some((msg, _)) = &status_message {
				footer_lines.push(format!("Status: {msg}"));
			}
			let footer = Paragraph::new(footer_lines.join("  |  ")).wrap(Wrap { trim: true });
			f.render_widget(footer, vertical[2]);

			if show_help {
				let area = centered_rect(70, 80, size);
				f.render_widget(Clear, area);
				let overlay = Paragraph::new(help_text())
					.block(Block::default().borders(Borders::ALL).title("Help"))
					.wrap(Wrap { trim: true });
				f.render_widget(overlay, area);
			}

			if form_open {
				let area = centered_rect(64, 75, size);
				f.render_widget(Clear, area);
				let body = if pending_create.is_some() {
					String::from("\nCreating task…")
				} else {
					form_body(
						&form_title,
						&form_description,
						&form_due,
						form_priority,
						form_category,
						users.get(form_assignee).map(|u| u.name.as_str()).unwrap_or("-"),
						form_field,
					)
				};
				let overlay = Paragraph::new(body)
					.block(
						Block::default()
							.borders(Borders::ALL)
							.title("New Task")
							.border_style(Style::default().fg(Color::Cyan))
							.title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
					)
					.wrap(Wrap { trim: true });
				f.render_widget(overlay, area);
			}
		})?;

		if event::poll(Duration::from_millis(100))? {
			if let Event::Key(key) = event::read()? {
				if key.kind == KeyEventKind::Press {
					if show_help && key.code != KeyCode::Char('?') && key.code != KeyCode::Esc {
						continue;
					}
					// Form mode captures everything while open.
					if form_open {
						if pending_create.is_some() {
							// Creation delay is running; ignore input until it lands.
							continue;
						}
						match key.code {
							KeyCode::Esc => {
								form_open = false;
								form_field = 0;
								form_title.clear();
								form_description.clear();
								form_due.clear();
								form_priority = TaskPriority::Medium;
								form_category = TaskCategory::Work;
								form_assignee = 0;
							}
							KeyCode::Tab => {
								form_field = (form_field + 1) % 6;
							}
							KeyCode::BackTab => {
								form_field = if form_field == 0 { 5 } else { form_field - 1 };
							}
							KeyCode::Char('s') if form_field == 4 => {
								form_category = suggest_category(&form_title, &form_description);
							}
							KeyCode::Char(c) if !c.is_control() && form_field <= 2 => {
								match form_field {
									0 => form_title.push(c),
									1 => form_description.push(c),
									2 => form_due.push(c),
									_ => {}
								}
							}
							KeyCode::Backspace => match form_field {
								0 => {
									form_title.pop();
								}
								1 => {
									form_description.pop();
								}
								2 => {
									form_due.pop();
								}
								_ => {}
							},
							KeyCode::Left => match form_field {
								3 => form_priority = cycle_back(&TaskPriority::ALL, form_priority),
								4 => form_category = cycle_back(&TaskCategory::ALL, form_category),
								5 => {
									form_assignee = if form_assignee == 0 {
										users.len().saturating_sub(1)
									} else {
										form_assignee - 1
									}
								}
								_ => {}
							},
							KeyCode::Right => match form_field {
								3 => form_priority = cycle_forward(&TaskPriority::ALL, form_priority),
								4 => form_category = cycle_forward(&TaskCategory::ALL, form_category),
								5 => form_assignee = (form_assignee + 1) % users.len().max(1),
								_ => {}
							},
							KeyCode::Enter => {
								if form_title.trim().is_empty() {
									status_message =
										Some(("Title is required".to_string(), Instant::now()));
								} else if let Some(assignee) =
									users.get(form_assignee).or_else(|| users.first())
								{
									let due_day = parse_day_input(&form_due).unwrap_or_else(|| {
										suggest_deadline(&form_title, &form_description, form_priority)
									});
									let task = Task {
										id: unique_task_id(&form_title, &all_tasks),
										title: form_title.trim().to_string(),
										description: form_description.trim().to_string(),
										assignee: assignee.clone(),
										due_date: at_local_time(due_day),
										created_at: Local::now(),
										status: TaskStatus::Pending,
										priority: form_priority,
										category: form_category,
										progress: 0,
										tags: None,
									};
									pending_create = Some((task, Instant::now() + create_delay));
								}
							}
							_ => {}
						}
						continue;
					}
					// Search mode captures typing for the browser filter.
					if search_mode {
						match key.code {
							KeyCode::Char(c) if !c.is_control() => {
								search_query.push(c);
							}
							KeyCode::Backspace => {
								search_query.pop();
							}
							KeyCode::Enter => {
								search_mode = false;
							}
							KeyCode::Esc => {
								search_mode = false;
								search_query.clear();
							}
							_ => {}
						}
						continue;
					}
					// Compose mode captures typing for the assistant.
					if compose_mode {
						match key.code {
							KeyCode::Char(c) if !c.is_control() => {
								compose_buf.push(c);
							}
							KeyCode::Backspace => {
								compose_buf.pop();
							}
							KeyCode::Enter => {
								let text = compose_buf.trim().to_string();
								if !text.is_empty() && pending_reply.is_none() {
									messages.push(ChatMessage::new(
										next_message_id.to_string(),
										ChatSender::User,
										text.clone(),
									));
									next_message_id += 1;
									pending_reply = Some((text, Instant::now() + reply_delay));
								}
								compose_mode = false;
								compose_buf.clear();
							}
							KeyCode::Esc => {
								compose_mode = false;
								compose_buf.clear();
							}
							_ => {}
						}
						continue;
					}
					match key.code {
						KeyCode::Char('q') => break,
						KeyCode::Char('?') => {
							show_help = !show_help;
						}
						KeyCode::Tab => {
							active_tab = active_tab.next();
						}
						KeyCode::BackTab => {
							active_tab = active_tab.prev();
						}
						KeyCode::Esc => {
							if show_help {
								show_help = false;
							} else if show_upcoming && active_tab == Tab::Calendar {
								show_upcoming = false;
							} else if !search_query.is_empty() {
								search_query.clear();
							}
						}
						KeyCode::Char('n') if active_tab != Tab::Assistant => {
							form_open = true;
							form_field = 0;
						}
						KeyCode::Char('j') | KeyCode::Down => match active_tab {
							Tab::Dashboard | Tab::Team => {
								let state = if active_tab == Tab::Team {
									&mut team_state
								} else {
									&mut dash_state
								};
								if let Some(sel) = state.selected() {
									if sel + 1 < visible.len() {
										state.select(Some(sel + 1));
									}
								}
							}
							Tab::Calendar => {
								selected_date = selected_date + chrono::Duration::days(7);
							}
							Tab::Assistant => {}
						},
						KeyCode::Char('k') | KeyCode::Up => match active_tab {
							Tab::Dashboard | Tab::Team => {
								let state = if active_tab == Tab::Team {
									&mut team_state
								} else {
									&mut dash_state
								};
								if let Some(sel) = state.selected() {
									if sel > 0 {
										state.select(Some(sel - 1));
									}
								}
							}
							Tab::Calendar => {
								selected_date = selected_date - chrono::Duration::days(7);
							}
							Tab::Assistant => {}
						},
						KeyCode::Char('h') | KeyCode::Left if active_tab == Tab::Calendar => {
							selected_date = selected_date - chrono::Duration::days(1);
						}
						KeyCode::Char('l') | KeyCode::Right if active_tab == Tab::Calendar => {
							selected_date = selected_date + chrono::Duration::days(1);
						}
						KeyCode::Char('[') if active_tab == Tab::Calendar => {
							selected_date = prev_month(selected_date);
						}
						KeyCode::Char(']') if active_tab == Tab::Calendar => {
							selected_date = next_month(selected_date);
						}
						KeyCode::Char('t') if active_tab == Tab::Calendar => {
							selected_date = Local::now().date_naive();
						}
						KeyCode::Char('v') if active_tab == Tab::Calendar => {
							show_upcoming = !show_upcoming;
						}
						KeyCode::Char('/') if matches!(active_tab, Tab::Dashboard | Tab::Team) => {
							search_mode = true;
						}
						KeyCode::Char('f') if matches!(active_tab, Tab::Dashboard | Tab::Team) => {
							status_filter = next_status_filter(status_filter);
							let label = status_filter.map(|s| s.label()).unwrap_or("all");
							status_message = Some((format!("Filter: {label}"), Instant::now()));
						}
						KeyCode::Char('s') if matches!(active_tab, Tab::Dashboard | Tab::Team) => {
							style_idx = (style_idx + 1) % styles.len();
							status_message = Some((
								format!("Status style: {}", styles[style_idx]),
								Instant::now(),
							));
						}
						KeyCode::Enter if active_tab == Tab::Assistant => {
							compose_mode = true;
							compose_buf.clear();
						}
						KeyCode::Char(c) if c.is_ascii_digit() => {
							let idx = c.to_digit(10).unwrap_or(0) as usize;
							if idx >= 1 && idx <= Tab::ALL.len() {
								active_tab = Tab::ALL[idx - 1];
							}
						}
						_ => {}
					}
				}
			}
		}
	}

	teardown_terminal()?;
	Ok(())
}

/// Indices into `tasks` that survive the team scope, the status filter, and
/// the search query, in input order.
fn visible_tasks(
	tasks: &[Task],
	team_only: bool,
	query: &str,
	filter: Option<TaskStatus>,
) -> Vec<usize> {
	tasks
		.iter()
		.enumerate()
		.filter(|(_, t)| !team_only || is_team_task(t))
		.filter(|(_, t)| filter.map(|s| t.status == s).unwrap_or(true))
		.filter(|(_, t)| matches_query(t, query))
		.map(|(idx, _)| idx)
		.collect()
}

fn next_status_filter(current: Option<TaskStatus>) -> Option<TaskStatus> {
	match current {
		None => Some(TaskStatus::Pending),
		Some(TaskStatus::Pending) => Some(TaskStatus::InProgress),
		Some(TaskStatus::InProgress) => Some(TaskStatus::Completed),
		Some(TaskStatus::Completed) => Some(TaskStatus::Overdue),
		Some(TaskStatus::Overdue) => None,
	}
}

fn cycle_forward<T: Copy + PartialEq>(all: &[T], current: T) -> T {
	let idx = all.iter().position(|v| *v == current).unwrap_or(0);
	all[(idx + 1) % all.len()]
}

fn cycle_back<T: Copy + PartialEq>(all: &[T], current: T) -> T {
	let idx = all.iter().position(|v| *v == current).unwrap_or(0);
	all[(idx + all.len() - 1) % all.len()]
}

fn at_local_time(date: NaiveDate) -> DateTime<Local> {
	let now = Local::now();
	date.and_time(now.time())
		.and_local_timezone(Local)
		.earliest()
		.unwrap_or(now)
}

fn render_task_browser(
	f: &mut Frame,
	area: Rect,
	all_tasks: &[Task],
	visible: &[usize],
	state: &mut ListState,
	title: &str,
	style: &str,
) {
	let panes = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(42), Constraint::Percentage(58)].as_ref())
		.split(area);

	let items: Vec<ListItem> = visible
		.iter()
		.filter_map(|&idx| all_tasks.get(idx))
		.map(|t| task_row(t, style))
		.collect();

	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title(title.to_string()))
		.highlight_symbol("▶ ")
		.highlight_style(
			Style::default()
				.add_modifier(Modifier::BOLD | Modifier::REVERSED)
				.fg(Color::White),
		);
	f.render_stateful_widget(list, panes[0], state);

	let detail_lines = match state
		.selected()
		.and_then(|sel| visible.get(sel))
		.and_then(|&idx| all_tasks.get(idx))
	{
		Some(task) => task_detail_lines(task),
		None if all_tasks.is_empty() => vec![
			Line::from(""),
			Line::from(Span::styled(
				"No tasks yet.",
				Style::default().add_modifier(Modifier::BOLD),
			)),
			Line::from(""),
			Line::from("Press n to create a task"),
		],
		None => vec![
			Line::from(""),
			Line::from("No tasks found"),
			Line::from(""),
			Line::from("Adjust the search or status filter"),
		],
	};
	let detail = Paragraph::new(Text::from(detail_lines))
		.block(Block::default().borders(Borders::ALL).title("Details"))
		.wrap(Wrap { trim: true });
	f.render_widget(detail, panes[1]);
}

fn render_stat_card(f: &mut Frame, area: Rect, title: &str, value: usize, color: Color) {
	let card = Paragraph::new(Line::from(Span::styled(
		value.to_string(),
		Style::default().fg(color).add_modifier(Modifier::BOLD),
	)))
	.block(Block::default().borders(Borders::ALL).title(title.to_string()));
	f.render_widget(card, area);
}

fn task_row<'a>(task: &'a Task, style: &str) -> ListItem<'a> {
	let (badge, badge_style) = status_indicator(task.status, style);
	let spans: Vec<Span> = vec![
		Span::styled(badge, badge_style),
		Span::raw(" "),
		Span::styled("● ", Style::default().fg(priority_color(task.priority))),
		Span::raw(task.title.as_str()),
		Span::styled(
			format!(" · {}", due_hint(task.due_date)),
			Style::default().fg(Color::DarkGray),
		),
		Span::styled(
			format!(" · {}", task.assignee.name),
			Style::default().fg(Color::DarkGray),
		),
	];
	ListItem::new(Line::from(spans))
}

fn task_detail_lines(task: &Task) -> Vec<Line<'static>> {
	let overdue = days_remaining(task.due_date) < 0;
	let due_style = if overdue {
		Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
	} else {
		Style::default()
	};
	let mut lines = vec![
		Line::from(Span::styled(
			task.title.clone(),
			Style::default().add_modifier(Modifier::BOLD),
		)),
		Line::from(vec![
			Span::raw(format!("{} {}", category_icon(task.category), task.category)),
			Span::raw("  ·  "),
			Span::styled(
				format!("{} priority", task.priority),
				Style::default().fg(priority_color(task.priority)),
			),
			Span::raw("  ·  "),
			Span::styled(
				task.status.label().to_string(),
				Style::default().fg(status_color(task.status)),
			),
		]),
		Line::from(""),
		Line::from(task.description.clone()),
		Line::from(""),
		Line::from(format!("Progress: {}", progress_bar(task.progress, 20))),
		Line::from(format!(
			"Assignee: {} ({})",
			task.assignee.name,
			task.assignee.initial()
		)),
		Line::from(format!("Created: {}", format_date(task.created_at))),
		Line::from(Span::styled(due_label(task), due_style)),
	];
	if let Some(tags) = &task.tags {
		if !tags.is_empty() {
			let joined = tags
				.iter()
				.map(|t| format!("#{t}"))
				.collect::<Vec<_>>()
				.join(" ");
			lines.push(Line::from(""));
			lines.push(Line::from(Span::styled(
				joined,
				Style::default().fg(Color::Cyan),
			)));
		}
	}
	lines
}

fn calendar_lines(tasks: &[Task], selected: NaiveDate) -> Vec<Line<'static>> {
	let today = Local::now().date_naive();
	let mut lines: Vec<Line> = Vec::new();
	let header: String = WEEKDAY_HEADER.iter().map(|d| format!("{:>2} ", d)).collect();
	lines.push(Line::from(Span::styled(
		header,
		Style::default().fg(Color::DarkGray),
	)));
	for week in month_grid(selected) {
		let mut spans: Vec<Span> = Vec::new();
		for cell in week {
			match cell {
				Some(day) => {
					let mut style = Style::default();
					if has_due(tasks, day) {
						style = style.fg(Color::Magenta).add_modifier(Modifier::BOLD);
					}
					if day == today {
						style = style.add_modifier(Modifier::UNDERLINED);
					}
					if day == selected {
						style = style.add_modifier(Modifier::REVERSED);
					}
					spans.push(Span::styled(format!("{:>2}", day.day()), style));
					spans.push(Span::raw(" "));
				}
				None => spans.push(Span::raw("   ")),
			}
		}
		lines.push(Line::from(spans));
	}
	lines.push(Line::from(""));
	lines.push(Line::from(Span::styled(
		"bold = has due tasks",
		Style::default().fg(Color::Magenta),
	)));
	lines
}

fn chat_lines(messages: &[ChatMessage], awaiting: bool) -> Vec<Line<'static>> {
	let mut lines: Vec<Line> = Vec::new();
	for msg in messages {
		let (name, color) = match msg.sender {
			ChatSender::User => ("You", Color::Cyan),
			ChatSender::Ai => ("Assistant", Color::Magenta),
		};
		lines.push(Line::from(vec![
			Span::styled(name, Style::default().fg(color).add_modifier(Modifier::BOLD)),
			Span::styled(
				format!(" · {}", msg.timestamp.format("%H:%M")),
				Style::default().fg(Color::DarkGray),
			),
		]));
		lines.push(Line::from(msg.content.clone()));
		lines.push(Line::from(""));
	}
	if awaiting {
		lines.push(Line::from(Span::styled(
			"Assistant is typing…",
			Style::default()
				.fg(Color::DarkGray)
				.add_modifier(Modifier::ITALIC),
		)));
	}
	lines
}

fn form_body(
	title: &str,
	description: &str,
	due: &str,
	priority: TaskPriority,
	category: TaskCategory,
	assignee: &str,
	field: usize,
) -> String {
	let cursors = [
		if field == 0 { "█" } else { "" },
		if field == 1 { "█" } else { "" },
		if field == 2 { "█" } else { "" },
	];
	let markers = [
		if field == 3 { "▶" } else { " " },
		if field == 4 { "▶" } else { " " },
		if field == 5 { "▶" } else { " " },
	];
	let suggested_due = suggest_deadline(title, description, priority);
	let suggested_category = suggest_category(title, description);
	format!(
		r#"Title
> {}{}

Description
> {}{}

Due date (YYYY-MM-DD or MM-DD, blank = {})
> {}{}

{} Priority: ◀ {} ▶
{} Category: ◀ {} ▶  (s applies suggestion: {})
{} Assignee: ◀ {} ▶

Tab switches field, Enter creates, Esc cancels"#,
		title,
		cursors[0],
		description,
		cursors[1],
		suggested_due.format("%Y-%m-%d"),
		due,
		cursors[2],
		markers[0],
		priority,
		markers[1],
		category,
		suggested_category,
		markers[2],
		assignee,
	)
}

fn browser_footer_text(width: u16) -> String {
	if width < 100 {
		"j/k | / find | f filter | s style | n new | Tab tabs | ? | q".to_string()
	} else {
		"Tasks: j/k move | / search | f cycle filter | s status style | n new task | Tab/1-4 switch tab | ? help | q quit".to_string()
	}
}

fn calendar_footer_text(width: u16) -> String {
	if width < 100 {
		"h/l day | j/k week | [/] month | t today | v upcoming | n | ? | q".to_string()
	} else {
		"Calendar: h/l day | j/k week | [/] month | t today | v upcoming list | n new task | ? help | q quit".to_string()
	}
}

fn assistant_footer_text(width: u16) -> String {
	if width < 100 {
		"Enter message | Tab tabs | ? | q".to_string()
	} else {
		"Assistant: Enter write message | Tab/1-4 switch tab | ? help | q quit".to_string()
	}
}

fn help_text() -> String {
	format!(
		r#"╭──────────────────────────────────────╮
│  TASK ZENITH - your day at a glance  │
│  v{:<35}│
╰──────────────────────────────────────╯

Tabs:
  Tab / Shift-Tab   next / previous tab
  1-4               jump to tab

Dashboard and Team Tasks:
  j/k        move selection
  /          search title, description, assignee
  f          cycle status filter
  s          cycle status badge style
  n          new task

Calendar:
  h/l        previous/next day
  j/k        previous/next week
  [/]        previous/next month
  t          jump to today
  v          toggle upcoming list

Assistant:
  Enter      write a message
  Esc        cancel typing

New task form:
  Tab        next field
  arrows     change priority/category/assignee
  s          apply the suggested category
  Enter      create (a blank or unparseable due
             date falls back to the suggestion)

Config: ~/.zenith/config.toml
  sample_tasks, status_style, assistant delays

q quits from any tab."#,
		env!("CARGO_PKG_VERSION")
	)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints(
			[
				Constraint::Percentage((100 - percent_y) / 2),
				Constraint::Percentage(percent_y),
				Constraint::Percentage((100 - percent_y) / 2),
			]
			.as_ref(),
		)
		.split(r);

	let horizontal = Layout::default()
		.direction(Direction::Horizontal)
		.constraints(
			[
				Constraint::Percentage((100 - percent_x) / 2),
				Constraint::Percentage(percent_x),
				Constraint::Percentage((100 - percent_x) / 2),
			]
			.as_ref(),
		)
		.split(popup_layout[1]);

	horizontal[1]
}

fn teardown_terminal() -> Result<()> {
	disable_raw_mode()?;
	execute!(stdout(), LeaveAlternateScreen)?;
	Ok(())
}
