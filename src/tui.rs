use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::confirm::{DeleteOutcome, ViewSession};
use crate::db::Database;
use crate::fields::{display_stored, JobStatus, TaskPriority, TaskStatus};
use crate::models::{Company, Job, Recruiter, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Dashboard,
    Jobs,
    Recruiters,
    Companies,
    Tasks,
}

impl View {
    fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Jobs => "Jobs",
            View::Recruiters => "Recruiters",
            View::Companies => "Companies",
            View::Tasks => "Tasks",
        }
    }
}

/// Dashboard numbers. Each query degrades to an empty section with a noted
/// warning instead of taking the whole screen down.
struct DashboardData {
    total_jobs: i64,
    status_counts: Vec<(JobStatus, i64)>,
    recent_companies: Vec<Company>,
    recent_recruiters: Vec<Recruiter>,
    upcoming_tasks: Vec<Task>,
    warnings: Vec<String>,
}

impl DashboardData {
    fn load(db: &Database) -> Self {
        let mut warnings = Vec::new();
        let total_jobs = db.total_jobs().unwrap_or_else(|e| {
            warnings.push(format!("total jobs: {}", e));
            0
        });
        let status_counts = db.job_status_counts().unwrap_or_else(|e| {
            warnings.push(format!("status counts: {}", e));
            Vec::new()
        });
        let recent_companies = db.recent_companies(3).unwrap_or_else(|e| {
            warnings.push(format!("recent companies: {}", e));
            Vec::new()
        });
        let recent_recruiters = db.recent_recruiters(3).unwrap_or_else(|e| {
            warnings.push(format!("recent recruiters: {}", e));
            Vec::new()
        });
        let upcoming_tasks = db.upcoming_tasks(5).unwrap_or_else(|e| {
            warnings.push(format!("upcoming tasks: {}", e));
            Vec::new()
        });
        Self {
            total_jobs,
            status_counts,
            recent_companies,
            recent_recruiters,
            upcoming_tasks,
            warnings,
        }
    }
}

struct AppState {
    view: View,
    jobs: Vec<Job>,
    companies: Vec<Company>,
    recruiters: Vec<Recruiter>,
    tasks: Vec<Task>,
    dashboard: DashboardData,
    selected: usize,
    session: ViewSession,
    message: Option<String>,
}

impl AppState {
    fn load(db: &Database) -> Result<Self> {
        Ok(Self {
            view: View::Dashboard,
            jobs: db.list_jobs(None)?,
            companies: db.list_companies()?,
            recruiters: db.list_recruiters()?,
            tasks: db.list_tasks()?,
            dashboard: DashboardData::load(db),
            selected: 0,
            session: ViewSession::default(),
            message: None,
        })
    }

    fn reload(&mut self, db: &Database) {
        match AppState::load(db) {
            Ok(fresh) => {
                let view = self.view;
                let selected = self.selected;
                *self = fresh;
                self.view = view;
                self.selected = selected.min(self.row_count().saturating_sub(1));
                self.sync_selection();
            }
            Err(e) => self.message = Some(format!("Reload failed: {}", e)),
        }
    }

    fn row_count(&self) -> usize {
        match self.view {
            View::Dashboard => 0,
            View::Jobs => self.jobs.len(),
            View::Recruiters => self.recruiters.len(),
            View::Companies => self.companies.len(),
            View::Tasks => self.tasks.len(),
        }
    }

    fn current_id(&self) -> Option<i64> {
        match self.view {
            View::Dashboard => None,
            View::Jobs => self.jobs.get(self.selected).map(|j| j.id),
            View::Recruiters => self.recruiters.get(self.selected).map(|r| r.id),
            View::Companies => self.companies.get(self.selected).map(|c| c.id),
            View::Tasks => self.tasks.get(self.selected).map(|t| t.id),
        }
    }

    fn current_label(&self) -> Option<String> {
        match self.view {
            View::Dashboard => None,
            View::Jobs => self.jobs.get(self.selected).map(|j| j.title.clone()),
            View::Recruiters => self.recruiters.get(self.selected).map(|r| r.name.clone()),
            View::Companies => self.companies.get(self.selected).map(|c| c.name.clone()),
            View::Tasks => self
                .tasks
                .get(self.selected)
                .map(|t| truncate(&t.description, 30)),
        }
    }

    /// Switching views implicitly cancels any pending delete request.
    fn switch_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.selected = 0;
            self.session.reset();
            self.sync_selection();
            self.message = None;
        }
    }

    fn next(&mut self) {
        let count = self.row_count();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
        self.sync_selection();
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.sync_selection();
    }

    /// Keeps the session's edit target pointed at the highlighted row.
    fn sync_selection(&mut self) {
        self.session.selected_for_edit = self.current_id();
    }

    fn request_delete(&mut self) {
        if let Some(id) = self.current_id() {
            if self.session.delete.is_pending(id) {
                return;
            }
            // replaces any previously pending record
            self.session.delete.request(id);
            self.message = None;
        }
    }

    fn confirm_pending(&mut self, db: &Database) {
        let view = self.view;
        let outcome = self.session.confirm_delete(|id| match view {
            View::Jobs => db.delete_job(id),
            View::Recruiters => db.delete_recruiter(id),
            View::Companies => db.delete_company(id),
            View::Tasks => db.delete_task(id),
            View::Dashboard => Ok(false),
        });
        match outcome {
            Ok(DeleteOutcome::Deleted(id)) => {
                self.message = Some(format!("Deleted #{}", id));
                self.reload(db);
            }
            Ok(DeleteOutcome::AlreadyGone(id)) => {
                self.message = Some(format!("#{} was already gone", id));
                self.reload(db);
            }
            Ok(DeleteOutcome::NothingPending) => {}
            Err(e) => self.message = Some(format!("Delete failed: {}", e)),
        }
    }
}

pub fn run_browse(db: &Database) -> Result<()> {
    let mut state = AppState::load(db)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, db);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    db: &Database,
) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        list_state.select(if state.row_count() > 0 {
            Some(state.selected)
        } else {
            None
        });
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let pending = state.session.delete.pending().is_some();
            match key.code {
                KeyCode::Char('y') if pending => state.confirm_pending(db),
                KeyCode::Char('n') if pending => {
                    state.session.delete.cancel();
                    state.message = Some("Deletion cancelled".to_string());
                }
                KeyCode::Esc if pending => state.session.delete.cancel(),
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('1') | KeyCode::Char('g') => state.switch_view(View::Dashboard),
                KeyCode::Char('2') => state.switch_view(View::Jobs),
                KeyCode::Char('3') => state.switch_view(View::Recruiters),
                KeyCode::Char('4') => state.switch_view(View::Companies),
                KeyCode::Char('5') => state.switch_view(View::Tasks),
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('d') => state.request_delete(),
                KeyCode::Char('r') => state.reload(db),
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    if state.view == View::Dashboard {
        let dash = Paragraph::new(build_dashboard(&state.dashboard))
            .block(Block::default().borders(Borders::ALL).title(" Dashboard "))
            .wrap(Wrap { trim: false });
        frame.render_widget(dash, outer[0]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(outer[0]);

        let items = build_list_items(state);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(format!(
                " {} ({}) ",
                state.view.title(),
                state.row_count()
            )))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, panes[0], list_state);

        let detail = Paragraph::new(build_detail(state))
            .block(Block::default().borders(Borders::ALL).title(" Detail "))
            .wrap(Wrap { trim: false });
        frame.render_widget(detail, panes[1]);
    }

    frame.render_widget(build_footer(state), outer[1]);
}

fn build_footer(state: &AppState) -> Paragraph<'static> {
    if let Some(id) = state.session.delete.pending() {
        let label = state.current_label().unwrap_or_default();
        return Paragraph::new(format!(
            " Permanently delete #{} '{}'?  y:confirm  n:cancel",
            id, label
        ))
        .style(Style::default().fg(Color::Black).bg(Color::Red));
    }
    if let Some(message) = &state.message {
        return Paragraph::new(format!(" {}", message))
            .style(Style::default().fg(Color::Yellow));
    }
    Paragraph::new(
        " 1:dashboard 2:jobs 3:recruiters 4:companies 5:tasks  j/k:navigate  d:delete  r:reload  q:quit",
    )
    .style(Style::default().fg(Color::DarkGray))
}

fn build_list_items(state: &AppState) -> Vec<ListItem<'static>> {
    match state.view {
        View::Dashboard => Vec::new(),
        View::Jobs => state
            .jobs
            .iter()
            .map(|job| {
                let company = job.company_name.as_deref().unwrap_or("?");
                ListItem::new(format!(
                    "#{:<4} [{}] {} | {}",
                    job.id,
                    display_stored(&job.status, JobStatus::parse),
                    truncate(&job.title, 30),
                    truncate(company, 18)
                ))
            })
            .collect(),
        View::Recruiters => state
            .recruiters
            .iter()
            .map(|rec| {
                let agency = rec.agency_name.as_deref().unwrap_or("-");
                ListItem::new(format!(
                    "#{:<4} {} | {}",
                    rec.id,
                    truncate(&rec.name, 25),
                    truncate(agency, 20)
                ))
            })
            .collect(),
        View::Companies => state
            .companies
            .iter()
            .map(|comp| {
                let sector = comp.sector.as_deref().unwrap_or("-");
                ListItem::new(format!(
                    "#{:<4} {} | {}",
                    comp.id,
                    truncate(&comp.name, 25),
                    truncate(sector, 20)
                ))
            })
            .collect(),
        View::Tasks => state
            .tasks
            .iter()
            .map(|task| {
                let due = task
                    .due_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "no due".to_string());
                ListItem::new(format!(
                    "#{:<4} [{}] {} | {}",
                    task.id,
                    display_stored(&task.status, TaskStatus::parse),
                    truncate(&task.description, 30),
                    due
                ))
            })
            .collect(),
    }
}

fn build_detail(state: &AppState) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    match state.view {
        View::Dashboard => {}
        View::Jobs => {
            let Some(job) = state.jobs.get(state.selected) else {
                return Text::raw("No job selected");
            };
            lines.push(bold(&job.title));
            if let Some(company) = &job.company_name {
                lines.push(Line::from(format!("at {}", company)));
            } else {
                lines.push(dim("(company no longer exists)"));
            }
            lines.push(Line::from(format!(
                "Status: {}",
                display_stored(&job.status, JobStatus::parse)
            )));
            push_opt(&mut lines, "Location", job.location.as_deref());
            push_opt(&mut lines, "URL", job.url.as_deref());
            if let Some(found) = job.date_found {
                lines.push(Line::from(format!("Found: {}", found)));
            }
            lines.push(Line::from(format!("Created: {}", job.created_at)));
            push_notes(&mut lines, job.notes.as_deref());
        }
        View::Recruiters => {
            let Some(rec) = state.recruiters.get(state.selected) else {
                return Text::raw("No recruiter selected");
            };
            lines.push(bold(&rec.name));
            match &rec.agency_name {
                Some(agency) => lines.push(Line::from(format!("Agency: {}", agency))),
                None => lines.push(dim("No agency")),
            }
            push_opt(&mut lines, "Contact", rec.contact_info.as_deref());
            if let Some(first) = rec.first_contact_date {
                lines.push(Line::from(format!("First contact: {}", first)));
            }
            lines.push(Line::from(format!("Created: {}", rec.created_at)));
            push_notes(&mut lines, rec.notes.as_deref());
        }
        View::Companies => {
            let Some(comp) = state.companies.get(state.selected) else {
                return Text::raw("No company selected");
            };
            lines.push(bold(&comp.name));
            push_opt(&mut lines, "Sector", comp.sector.as_deref());
            push_opt(&mut lines, "Website", comp.website.as_deref());
            push_opt(&mut lines, "Source", comp.source.as_deref());
            lines.push(Line::from(format!("Created: {}", comp.created_at)));
            push_notes(&mut lines, comp.notes.as_deref());
        }
        View::Tasks => {
            let Some(task) = state.tasks.get(state.selected) else {
                return Text::raw("No task selected");
            };
            lines.push(bold(&task.description));
            lines.push(Line::from(format!(
                "Status: {}",
                display_stored(&task.status, TaskStatus::parse)
            )));
            match task.due_date {
                Some(due) => lines.push(Line::from(format!("Due: {}", due))),
                None => lines.push(dim("No due date")),
            }
            if let Some(prio) = task.priority.as_deref() {
                lines.push(Line::from(format!(
                    "Priority: {}",
                    display_stored(prio, TaskPriority::parse)
                )));
            }
            push_opt(&mut lines, "Job", task.job_title.as_deref());
            push_opt(&mut lines, "Recruiter", task.recruiter_name.as_deref());
            push_opt(&mut lines, "Company", task.company_name.as_deref());
            lines.push(Line::from(format!("Created: {}", task.created_at)));
            push_notes(&mut lines, task.notes.as_deref());
        }
    }

    Text::from(lines)
}

fn build_dashboard(dash: &DashboardData) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(bold(&format!("Total jobs tracked: {}", dash.total_jobs)));
    lines.push(Line::from(""));

    lines.push(bold("By status"));
    for (status, count) in &dash.status_counts {
        lines.push(Line::from(format!("  {:<18} {}", status.to_string(), count)));
    }
    lines.push(Line::from(""));

    lines.push(bold("Recently added companies"));
    if dash.recent_companies.is_empty() {
        lines.push(dim("  none"));
    }
    for comp in &dash.recent_companies {
        lines.push(Line::from(format!("  {} (added {})", comp.name, comp.created_at)));
    }
    lines.push(Line::from(""));

    lines.push(bold("Recently added recruiters"));
    if dash.recent_recruiters.is_empty() {
        lines.push(dim("  none"));
    }
    for rec in &dash.recent_recruiters {
        lines.push(Line::from(format!("  {} (added {})", rec.name, rec.created_at)));
    }
    lines.push(Line::from(""));

    lines.push(bold("Upcoming tasks"));
    if dash.upcoming_tasks.is_empty() {
        lines.push(dim("  none"));
    }
    for task in &dash.upcoming_tasks {
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no due date".to_string());
        lines.push(Line::from(format!(
            "  {} (due {}, {})",
            truncate(&task.description, 40),
            due,
            task.status
        )));
    }

    if !dash.warnings.is_empty() {
        lines.push(Line::from(""));
        for warning in &dash.warnings {
            lines.push(Line::from(Span::styled(
                format!("  ! {}", warning),
                Style::default().fg(Color::Red),
            )));
        }
    }

    Text::from(lines)
}

fn push_opt(lines: &mut Vec<Line<'static>>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            lines.push(Line::from(format!("{}: {}", label, value)));
        }
    }
}

fn push_notes(lines: &mut Vec<Line<'static>>, notes: Option<&str>) {
    let Some(notes) = notes.filter(|n| !n.is_empty()) else {
        return;
    };
    lines.push(Line::from(""));
    lines.push(bold("Notes"));
    for line in textwrap::fill(notes, 70).lines() {
        lines.push(Line::from(line.to_string()));
    }
}

fn bold(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
