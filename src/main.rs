mod confirm;
mod db;
mod fields;
mod models;
mod resolver;
mod tui;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, Write};

use confirm::{DeleteOutcome, ViewSession};
use db::Database;
use fields::{display_stored, JobStatus, TaskPriority, TaskStatus};
use models::{NewCompany, NewJob, NewRecruiter, NewTask};
use resolver::{CompanyChoice, RefCache};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Personal job-search tracker - companies, postings, recruiters, follow-ups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Show aggregate counts and upcoming work
    Dashboard,

    /// Browse everything in a terminal UI
    Browse,

    /// Track companies of interest
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Track job postings
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Track recruiters
    Recruiter {
        #[command(subcommand)]
        command: RecruiterCommands,
    },

    /// Track follow-up tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// List all companies
    List,

    /// Show company details
    Show {
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a company
    Add {
        name: String,

        #[arg(short, long)]
        sector: Option<String>,

        #[arg(short, long)]
        website: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Where this company was found
        #[arg(long)]
        source: Option<String>,
    },

    /// Edit a company; unspecified fields keep their current values
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        sector: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        source: Option<String>,
    },

    /// Delete a company after confirmation
    Rm {
        id: i64,

        /// Skip the interactive prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List jobs
    List {
        /// Filter by application status
        #[arg(short, long, value_enum)]
        status: Option<JobStatus>,
    },

    /// Show job details
    Show {
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a job posting
    Add {
        title: String,

        /// Existing company, by exact name
        #[arg(short, long)]
        company: Option<String>,

        /// Create a new company with this name and link the job to it
        #[arg(long)]
        new_company: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long, value_enum, default_value = "not-applied")]
        status: JobStatus,

        /// Link to the job posting
        #[arg(short, long)]
        url: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Date the posting was found (YYYY-MM-DD)
        #[arg(short, long)]
        found: Option<NaiveDate>,
    },

    /// Edit a job; unspecified fields keep their current values
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// Move the job to an existing company, by exact name
        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, value_enum)]
        status: Option<JobStatus>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        found: Option<NaiveDate>,
    },

    /// Delete a job after confirmation
    Rm {
        id: i64,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RecruiterCommands {
    /// List all recruiters
    List,

    /// Show recruiter details
    Show {
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a recruiter
    Add {
        name: String,

        /// Agency company, by exact name
        #[arg(short, long)]
        agency: Option<String>,

        #[arg(short, long)]
        contact: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Date of first contact (YYYY-MM-DD)
        #[arg(long)]
        first_contact: Option<NaiveDate>,
    },

    /// Edit a recruiter; unspecified fields keep their current values
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        agency: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        first_contact: Option<NaiveDate>,
    },

    /// Delete a recruiter after confirmation
    Rm {
        id: i64,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List all tasks
    List,

    /// Show task details
    Show {
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a follow-up task
    Add {
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<NaiveDate>,

        #[arg(short, long, value_enum, default_value = "open")]
        status: TaskStatus,

        #[arg(short, long, value_enum)]
        priority: Option<TaskPriority>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Link to a job, by exact title
        #[arg(long)]
        job: Option<String>,

        /// Link to a recruiter, by exact name
        #[arg(long)]
        recruiter: Option<String>,

        /// Link to a company, by exact name
        #[arg(long)]
        company: Option<String>,
    },

    /// Edit a task; unspecified fields keep their current values
    Edit {
        id: i64,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        due: Option<NaiveDate>,

        #[arg(long, value_enum)]
        status: Option<TaskStatus>,

        #[arg(long, value_enum)]
        priority: Option<TaskPriority>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        job: Option<String>,

        #[arg(long)]
        recruiter: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Delete a task after confirmation
    Rm {
        id: i64,

        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let db = Database::open()
        .context("Cannot open the tracker database; check JOBTRACK_DB and the data directory")?;

    match cli.command {
        Commands::Init => {
            db.init()?;
            println!("Database initialized at {}", db.path().display());
        }

        Commands::Dashboard => {
            db.ensure_initialized()?;
            show_dashboard(&db);
        }

        Commands::Browse => {
            db.ensure_initialized()?;
            tui::run_browse(&db)?;
        }

        Commands::Company { command } => {
            db.ensure_initialized()?;
            company_command(&db, command)?;
        }

        Commands::Job { command } => {
            db.ensure_initialized()?;
            job_command(&db, command)?;
        }

        Commands::Recruiter { command } => {
            db.ensure_initialized()?;
            recruiter_command(&db, command)?;
        }

        Commands::Task { command } => {
            db.ensure_initialized()?;
            task_command(&db, command)?;
        }
    }

    Ok(())
}

/// Every dashboard section degrades to empty with a warning on stderr; one
/// failed query never blanks the rest.
fn show_dashboard(db: &Database) {
    let total = db.total_jobs().unwrap_or_else(|e| {
        eprintln!("Warning: total job count unavailable: {}", e);
        0
    });
    let counts = db.job_status_counts().unwrap_or_else(|e| {
        eprintln!("Warning: status counts unavailable: {}", e);
        Vec::new()
    });
    let companies = db.recent_companies(3).unwrap_or_else(|e| {
        eprintln!("Warning: recent companies unavailable: {}", e);
        Vec::new()
    });
    let recruiters = db.recent_recruiters(3).unwrap_or_else(|e| {
        eprintln!("Warning: recent recruiters unavailable: {}", e);
        Vec::new()
    });
    let tasks = db.upcoming_tasks(5).unwrap_or_else(|e| {
        eprintln!("Warning: upcoming tasks unavailable: {}", e);
        Vec::new()
    });

    println!("Total jobs tracked: {}", total);
    for (status, count) in &counts {
        println!("  {:<18} {}", status.to_string(), count);
    }

    println!("\nRecently added companies:");
    if companies.is_empty() {
        println!("  (none)");
    }
    for company in &companies {
        println!("  {} (added {})", company.name, company.created_at);
    }

    println!("\nRecently added recruiters:");
    if recruiters.is_empty() {
        println!("  (none)");
    }
    for recruiter in &recruiters {
        println!("  {} (added {})", recruiter.name, recruiter.created_at);
    }

    println!("\nUpcoming tasks:");
    if tasks.is_empty() {
        println!("  (none)");
    }
    for task in &tasks {
        let mut related = Vec::new();
        if let Some(title) = &task.job_title {
            related.push(format!("job: {}", title));
        }
        if let Some(name) = &task.recruiter_name {
            related.push(format!("rec: {}", name));
        }
        if let Some(name) = &task.company_name {
            related.push(format!("co: {}", name));
        }
        let related = if related.is_empty() {
            String::new()
        } else {
            format!(" [{}]", related.join(", "))
        };
        println!(
            "  {} (due {}, {}{}){}",
            truncate(&task.description, 50),
            fmt_date(task.due_date),
            task.status,
            task.priority
                .as_deref()
                .map(|p| format!(", {}", p))
                .unwrap_or_default(),
            related
        );
    }
}

fn company_command(db: &Database, command: CompanyCommands) -> Result<()> {
    match command {
        CompanyCommands::List => {
            let companies = db.list_companies()?;
            if companies.is_empty() {
                println!("No companies found.");
                return Ok(());
            }
            println!(
                "{:<6} {:<28} {:<18} {:<28}",
                "ID", "NAME", "SECTOR", "WEBSITE"
            );
            println!("{}", "-".repeat(82));
            for company in companies {
                println!(
                    "{:<6} {:<28} {:<18} {:<28}",
                    company.id,
                    truncate(&company.name, 26),
                    truncate(company.sector.as_deref().unwrap_or("-"), 16),
                    truncate(company.website.as_deref().unwrap_or("-"), 26)
                );
            }
        }

        CompanyCommands::Show { id, json } => match db.get_company(id)? {
            Some(company) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&company)?);
                    return Ok(());
                }
                println!("Company #{}", company.id);
                println!("Name: {}", company.name);
                print_opt("Sector", company.sector.as_deref());
                print_opt("Website", company.website.as_deref());
                print_opt("Source", company.source.as_deref());
                println!("Created: {}", company.created_at);
                print_opt("Notes", company.notes.as_deref());
            }
            None => println!("Company #{} not found. It may have been deleted.", id),
        },

        CompanyCommands::Add {
            name,
            sector,
            website,
            notes,
            source,
        } => {
            let id = db.add_company(&NewCompany {
                name,
                sector,
                website,
                notes,
                source,
            })?;
            println!("Added company #{}", id);
        }

        CompanyCommands::Edit {
            id,
            name,
            sector,
            website,
            notes,
            source,
        } => {
            let Some(current) = db.get_company(id)? else {
                println!("Company #{} not found. It may have been deleted; please reselect.", id);
                return Ok(());
            };
            let payload = NewCompany {
                name: name.unwrap_or(current.name),
                sector: sector.or(current.sector),
                website: website.or(current.website),
                notes: notes.or(current.notes),
                source: source.or(current.source),
            };
            if db.update_company(id, &payload)? {
                println!("Company #{} updated.", id);
            } else {
                println!("Company #{} disappeared before the update; please reselect.", id);
            }
        }

        CompanyCommands::Rm { id, yes } => {
            delete_with_confirmation("company", id, yes, |id| db.delete_company(id))?;
        }
    }
    Ok(())
}

fn job_command(db: &Database, command: JobCommands) -> Result<()> {
    match command {
        JobCommands::List { status } => {
            let status_str = status.map(|s| s.to_string());
            let jobs = db.list_jobs(status_str.as_deref())?;
            if jobs.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }
            println!(
                "{:<6} {:<14} {:<30} {:<20} {:<12}",
                "ID", "STATUS", "TITLE", "COMPANY", "FOUND"
            );
            println!("{}", "-".repeat(84));
            for job in jobs {
                println!(
                    "{:<6} {:<14} {:<30} {:<20} {:<12}",
                    job.id,
                    display_stored(&job.status, JobStatus::parse),
                    truncate(&job.title, 28),
                    truncate(job.company_name.as_deref().unwrap_or("-"), 18),
                    fmt_date(job.date_found)
                );
            }
        }

        JobCommands::Show { id, json } => match db.get_job(id)? {
            Some(job) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&job)?);
                    return Ok(());
                }
                println!("Job #{}", job.id);
                println!("Title: {}", job.title);
                match &job.company_name {
                    Some(name) => println!("Company: {} (#{})", name, job.company_id),
                    None => println!("Company: (no longer exists, was #{})", job.company_id),
                }
                println!("Status: {}", display_stored(&job.status, JobStatus::parse));
                print_opt("Location", job.location.as_deref());
                print_opt("URL", job.url.as_deref());
                if let Some(found) = job.date_found {
                    println!("Found: {}", found);
                }
                println!("Created: {}", job.created_at);
                print_opt("Notes", job.notes.as_deref());
            }
            None => println!("Job #{} not found. It may have been deleted.", id),
        },

        JobCommands::Add {
            title,
            company,
            new_company,
            location,
            status,
            url,
            notes,
            found,
        } => {
            let mut cache = RefCache::load(db)?;
            let choice = CompanyChoice::from_args(company, new_company);
            let job = NewJob {
                title,
                company_id: 0, // filled in by the resolver
                location,
                status: status.to_string(),
                url,
                notes,
                date_found: found,
            };
            let id = resolver::insert_job(db, &mut cache, job, &choice)?;
            println!("Added job #{}", id);
        }

        JobCommands::Edit {
            id,
            title,
            company,
            location,
            status,
            url,
            notes,
            found,
        } => {
            let Some(current) = db.get_job(id)? else {
                println!("Job #{} not found. It may have been deleted; please reselect.", id);
                return Ok(());
            };
            let company_id = match company {
                Some(name) => RefCache::load(db)?.company_id(&name)?,
                None => current.company_id,
            };
            // a stored status that no longer parses falls back to the first
            // option, mirroring the editable selector
            let status = status
                .unwrap_or_else(|| JobStatus::from_stored(&current.status))
                .to_string();
            let payload = NewJob {
                title: title.unwrap_or(current.title),
                company_id,
                location: location.or(current.location),
                status,
                url: url.or(current.url),
                notes: notes.or(current.notes),
                date_found: found.or(current.date_found),
            };
            if db.update_job(id, &payload)? {
                println!("Job #{} updated.", id);
            } else {
                println!("Job #{} disappeared before the update; please reselect.", id);
            }
        }

        JobCommands::Rm { id, yes } => {
            delete_with_confirmation("job", id, yes, |id| db.delete_job(id))?;
        }
    }
    Ok(())
}

fn recruiter_command(db: &Database, command: RecruiterCommands) -> Result<()> {
    match command {
        RecruiterCommands::List => {
            let recruiters = db.list_recruiters()?;
            if recruiters.is_empty() {
                println!("No recruiters found.");
                return Ok(());
            }
            println!(
                "{:<6} {:<24} {:<24} {:<14}",
                "ID", "NAME", "AGENCY", "FIRST CONTACT"
            );
            println!("{}", "-".repeat(70));
            for recruiter in recruiters {
                println!(
                    "{:<6} {:<24} {:<24} {:<14}",
                    recruiter.id,
                    truncate(&recruiter.name, 22),
                    truncate(recruiter.agency_name.as_deref().unwrap_or("-"), 22),
                    fmt_date(recruiter.first_contact_date)
                );
            }
        }

        RecruiterCommands::Show { id, json } => match db.get_recruiter(id)? {
            Some(recruiter) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&recruiter)?);
                    return Ok(());
                }
                println!("Recruiter #{}", recruiter.id);
                println!("Name: {}", recruiter.name);
                print_opt("Agency", recruiter.agency_name.as_deref());
                print_opt("Contact", recruiter.contact_info.as_deref());
                if let Some(first) = recruiter.first_contact_date {
                    println!("First contact: {}", first);
                }
                println!("Created: {}", recruiter.created_at);
                print_opt("Notes", recruiter.notes.as_deref());
            }
            None => println!("Recruiter #{} not found. It may have been deleted.", id),
        },

        RecruiterCommands::Add {
            name,
            agency,
            contact,
            notes,
            first_contact,
        } => {
            let agency_company_id = match agency {
                Some(name) => Some(RefCache::load(db)?.company_id(&name)?),
                None => None,
            };
            let id = db.add_recruiter(&NewRecruiter {
                name,
                agency_company_id,
                contact_info: contact,
                notes,
                first_contact_date: first_contact,
            })?;
            println!("Added recruiter #{}", id);
        }

        RecruiterCommands::Edit {
            id,
            name,
            agency,
            contact,
            notes,
            first_contact,
        } => {
            let Some(current) = db.get_recruiter(id)? else {
                println!("Recruiter #{} not found. It may have been deleted; please reselect.", id);
                return Ok(());
            };
            let agency_company_id = match agency {
                Some(name) => Some(RefCache::load(db)?.company_id(&name)?),
                None => current.agency_company_id,
            };
            let payload = NewRecruiter {
                name: name.unwrap_or(current.name),
                agency_company_id,
                contact_info: contact.or(current.contact_info),
                notes: notes.or(current.notes),
                first_contact_date: first_contact.or(current.first_contact_date),
            };
            if db.update_recruiter(id, &payload)? {
                println!("Recruiter #{} updated.", id);
            } else {
                println!("Recruiter #{} disappeared before the update; please reselect.", id);
            }
        }

        RecruiterCommands::Rm { id, yes } => {
            delete_with_confirmation("recruiter", id, yes, |id| db.delete_recruiter(id))?;
        }
    }
    Ok(())
}

fn task_command(db: &Database, command: TaskCommands) -> Result<()> {
    match command {
        TaskCommands::List => {
            let tasks = db.list_tasks()?;
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            println!(
                "{:<6} {:<18} {:<8} {:<12} {:<34} {:<24}",
                "ID", "STATUS", "PRIO", "DUE", "DESCRIPTION", "RELATED"
            );
            println!("{}", "-".repeat(104));
            for task in tasks {
                let mut related = Vec::new();
                if let Some(title) = &task.job_title {
                    related.push(format!("J:{}", truncate(title, 12)));
                }
                if let Some(name) = &task.recruiter_name {
                    related.push(format!("R:{}", truncate(name, 12)));
                }
                if let Some(name) = &task.company_name {
                    related.push(format!("C:{}", truncate(name, 12)));
                }
                println!(
                    "{:<6} {:<18} {:<8} {:<12} {:<34} {:<24}",
                    task.id,
                    display_stored(&task.status, TaskStatus::parse),
                    task.priority
                        .as_deref()
                        .map(|p| display_stored(p, TaskPriority::parse))
                        .unwrap_or_else(|| "-".to_string()),
                    fmt_date(task.due_date),
                    truncate(&task.description, 32),
                    if related.is_empty() {
                        "-".to_string()
                    } else {
                        related.join(" ")
                    }
                );
            }
        }

        TaskCommands::Show { id, json } => match db.get_task(id)? {
            Some(task) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&task)?);
                    return Ok(());
                }
                println!("Task #{}", task.id);
                println!("Description: {}", task.description);
                println!("Status: {}", display_stored(&task.status, TaskStatus::parse));
                if let Some(due) = task.due_date {
                    println!("Due: {}", due);
                }
                print_opt("Priority", task.priority.as_deref());
                print_opt("Job", task.job_title.as_deref());
                print_opt("Recruiter", task.recruiter_name.as_deref());
                print_opt("Company", task.company_name.as_deref());
                println!("Created: {}", task.created_at);
                print_opt("Notes", task.notes.as_deref());
            }
            None => println!("Task #{} not found. It may have been deleted.", id),
        },

        TaskCommands::Add {
            description,
            due,
            status,
            priority,
            notes,
            job,
            recruiter,
            company,
        } => {
            let cache = RefCache::load(db)?;
            let task = NewTask {
                description,
                due_date: due,
                status: status.to_string(),
                priority: priority.map(|p| p.to_string()),
                notes,
                job_id: resolve_link(&cache, job, LinkKind::Job)?,
                recruiter_id: resolve_link(&cache, recruiter, LinkKind::Recruiter)?,
                company_id: resolve_link(&cache, company, LinkKind::Company)?,
            };
            let id = db.add_task(&task)?;
            println!("Added task #{}", id);
        }

        TaskCommands::Edit {
            id,
            description,
            due,
            status,
            priority,
            notes,
            job,
            recruiter,
            company,
        } => {
            let Some(current) = db.get_task(id)? else {
                println!("Task #{} not found. It may have been deleted; please reselect.", id);
                return Ok(());
            };
            let cache = RefCache::load(db)?;
            let status = status
                .unwrap_or_else(|| TaskStatus::from_stored(&current.status))
                .to_string();
            let payload = NewTask {
                description: description.unwrap_or(current.description),
                due_date: due.or(current.due_date),
                status,
                priority: priority.map(|p| p.to_string()).or(current.priority),
                notes: notes.or(current.notes),
                job_id: resolve_link(&cache, job, LinkKind::Job)?.or(current.job_id),
                recruiter_id: resolve_link(&cache, recruiter, LinkKind::Recruiter)?
                    .or(current.recruiter_id),
                company_id: resolve_link(&cache, company, LinkKind::Company)?
                    .or(current.company_id),
            };
            if db.update_task(id, &payload)? {
                println!("Task #{} updated.", id);
            } else {
                println!("Task #{} disappeared before the update; please reselect.", id);
            }
        }

        TaskCommands::Rm { id, yes } => {
            delete_with_confirmation("task", id, yes, |id| db.delete_task(id))?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum LinkKind {
    Job,
    Recruiter,
    Company,
}

fn resolve_link(cache: &RefCache, name: Option<String>, kind: LinkKind) -> Result<Option<i64>> {
    let Some(name) = name else { return Ok(None) };
    let id = match kind {
        LinkKind::Job => cache.job_id(&name)?,
        LinkKind::Recruiter => cache.recruiter_id(&name)?,
        LinkKind::Company => cache.company_id(&name)?,
    };
    Ok(Some(id))
}

/// Two-step delete for the CLI: request, ask, then confirm or cancel. `--yes`
/// supplies the confirmation up front; everything still goes through the
/// same state machine.
fn delete_with_confirmation<F>(label: &str, id: i64, assume_yes: bool, delete_fn: F) -> Result<()>
where
    F: FnOnce(i64) -> Result<bool>,
{
    let mut session = ViewSession::default();
    session.delete.request(id);

    if !assume_yes {
        print!("Permanently delete {} #{}? Type 'yes' to confirm: ", label, id);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if line.trim() != "yes" {
            session.delete.cancel();
            println!("Cancelled. Nothing was deleted.");
            return Ok(());
        }
    }

    match session.confirm_delete(delete_fn)? {
        DeleteOutcome::Deleted(id) => println!("Deleted {} #{}.", label, id),
        DeleteOutcome::AlreadyGone(id) => {
            println!("{} #{} was already gone.", capitalize(label), id)
        }
        DeleteOutcome::NothingPending => {}
    }
    Ok(())
}

fn print_opt(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
