use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};
use std::path::PathBuf;

use crate::fields::JobStatus;
use crate::models::{
    Company, Job, NewCompany, NewJob, NewRecruiter, NewTask, Recruiter, Task,
};

const JOB_SELECT: &str = "SELECT j.job_id, j.job_title, j.company_id, c.company_name,
        j.location, j.status, j.job_url, j.notes, j.date_found, j.created_at
 FROM jobs j
 LEFT JOIN companies c ON j.company_id = c.company_id";

const RECRUITER_SELECT: &str = "SELECT r.recruiter_id, r.name, r.agency_company_id, c.company_name,
        r.contact_info, r.notes, r.first_contact_date, r.created_at
 FROM recruiters r
 LEFT JOIN companies c ON r.agency_company_id = c.company_id";

const TASK_SELECT: &str = "SELECT t.task_id, t.task_description, t.due_date, t.status, t.priority, t.notes,
        t.job_id, j.job_title, t.recruiter_id, r.name, t.company_id, c.company_name,
        t.created_at
 FROM tasks t
 LEFT JOIN jobs j ON t.job_id = j.job_id
 LEFT JOIN recruiters r ON t.recruiter_id = r.recruiter_id
 LEFT JOIN companies c ON t.company_id = c.company_id";

// High=3 .. Low=1; anything else (including NULL) sorts last either direction.
const PRIORITY_RANK: &str =
    "CASE t.priority WHEN 'High' THEN 3 WHEN 'Medium' THEN 2 WHEN 'Low' THEN 1 END";

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open() -> Result<Self> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open tracker database at {:?}", path))?;
        Ok(Self { conn, path })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> PathBuf {
        // JOBTRACK_DB overrides; otherwise XDG data directory or fallback
        if let Ok(path) = std::env::var("JOBTRACK_DB") {
            return PathBuf::from(path);
        }
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobtrack") {
            proj_dirs.data_dir().join("jobtrack.db")
        } else {
            PathBuf::from("jobtrack.db")
        }
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                company_id INTEGER PRIMARY KEY AUTOINCREMENT,
                company_name TEXT NOT NULL,
                sector TEXT,
                website TEXT,
                notes TEXT,
                source TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS jobs (
                job_id INTEGER PRIMARY KEY AUTOINCREMENT,
                job_title TEXT NOT NULL,
                company_id INTEGER NOT NULL REFERENCES companies(company_id),
                location TEXT,
                status TEXT NOT NULL DEFAULT 'Not Applied' CHECK (status IN ('Not Applied', 'Applied', 'Interviewing', 'Rejected', 'Offer')),
                job_url TEXT,
                notes TEXT,
                date_found TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS recruiters (
                recruiter_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                agency_company_id INTEGER REFERENCES companies(company_id),
                contact_info TEXT,
                notes TEXT,
                first_contact_date TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS tasks (
                task_id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_description TEXT NOT NULL,
                due_date TEXT,
                status TEXT NOT NULL DEFAULT 'Open' CHECK (status IN ('Open', 'In Progress', 'Awaiting Feedback', 'Completed', 'Cancelled')),
                priority TEXT CHECK (priority IN ('Low', 'Medium', 'High')),
                notes TEXT,
                job_id INTEGER REFERENCES jobs(job_id),
                recruiter_id INTEGER REFERENCES recruiters(recruiter_id),
                company_id INTEGER REFERENCES companies(company_id),
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company_id);
            CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs(status);
            CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
            CREATE INDEX IF NOT EXISTS idx_tasks_job ON tasks(job_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_recruiter ON tasks(recruiter_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_company ON tasks(company_id);
            "#,
        )?;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='jobs'",
            [],
            |row| row.get(0),
        )?;
        if tables == 0 {
            return Err(anyhow!("Database not initialized. Run 'jobtrack init' first."));
        }
        Ok(())
    }

    fn require(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(anyhow!("{} is required", field));
        }
        Ok(())
    }

    // --- Company operations ---

    pub fn add_company(&self, company: &NewCompany) -> Result<i64> {
        Self::require("Company name", &company.name)?;
        self.conn.execute(
            "INSERT INTO companies (company_name, sector, website, notes, source)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                company.name,
                company.sector,
                company.website,
                company.notes,
                company.source
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_companies(&self) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT company_id, company_name, sector, website, notes, source, created_at
             FROM companies ORDER BY company_name ASC",
        )?;
        let rows = stmt.query_map([], Self::row_to_company)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list companies")
    }

    pub fn get_company(&self, id: i64) -> Result<Option<Company>> {
        let result = self.conn.query_row(
            "SELECT company_id, company_name, sector, website, notes, source, created_at
             FROM companies WHERE company_id = ?1",
            [id],
            Self::row_to_company,
        );
        match result {
            Ok(company) => Ok(Some(company)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Full-row replace; returns false when the id no longer exists.
    pub fn update_company(&self, id: i64, company: &NewCompany) -> Result<bool> {
        Self::require("Company name", &company.name)?;
        let changed = self.conn.execute(
            "UPDATE companies SET company_name = ?1, sector = ?2, website = ?3, notes = ?4, source = ?5
             WHERE company_id = ?6",
            params![
                company.name,
                company.sector,
                company.website,
                company.notes,
                company.source,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_company(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE company_id = ?1", [id])?;
        Ok(changed > 0)
    }

    fn row_to_company(row: &rusqlite::Row) -> rusqlite::Result<Company> {
        Ok(Company {
            id: row.get(0)?,
            name: row.get(1)?,
            sector: row.get(2)?,
            website: row.get(3)?,
            notes: row.get(4)?,
            source: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    // --- Job operations ---

    pub fn add_job(&self, job: &NewJob) -> Result<i64> {
        Self::require("Job title", &job.title)?;
        self.conn.execute(
            "INSERT INTO jobs (job_title, company_id, location, status, job_url, notes, date_found)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                job.title,
                job.company_id,
                job.location,
                job.status,
                job.url,
                job.notes,
                job.date_found
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Creates the company and the job in one transaction so a failure on
    /// either insert leaves no partial row behind. Returns (job_id, company_id).
    pub fn add_job_with_new_company(
        &self,
        job: &NewJob,
        company_name: &str,
    ) -> Result<(i64, i64)> {
        Self::require("Job title", &job.title)?;
        Self::require("Company name", company_name)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO companies (company_name) VALUES (?1)",
            [company_name],
        )?;
        let company_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO jobs (job_title, company_id, location, status, job_url, notes, date_found)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                job.title,
                company_id,
                job.location,
                job.status,
                job.url,
                job.notes,
                job.date_found
            ],
        )?;
        let job_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok((job_id, company_id))
    }

    pub fn list_jobs(&self, status: Option<&str>) -> Result<Vec<Job>> {
        let mut sql = String::from(JOB_SELECT);
        if status.is_some() {
            sql.push_str(" WHERE j.status = ?1");
        }
        sql.push_str(" ORDER BY j.created_at DESC, j.job_id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = if let Some(s) = status {
            stmt.query_map([s], Self::row_to_job)?
        } else {
            stmt.query_map([], Self::row_to_job)?
        };
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list jobs")
    }

    pub fn get_job(&self, id: i64) -> Result<Option<Job>> {
        let sql = format!("{} WHERE j.job_id = ?1", JOB_SELECT);
        let result = self.conn.query_row(&sql, [id], Self::row_to_job);
        match result {
            Ok(job) => Ok(Some(job)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn update_job(&self, id: i64, job: &NewJob) -> Result<bool> {
        Self::require("Job title", &job.title)?;
        let changed = self.conn.execute(
            "UPDATE jobs SET job_title = ?1, company_id = ?2, location = ?3, status = ?4,
                    job_url = ?5, notes = ?6, date_found = ?7
             WHERE job_id = ?8",
            params![
                job.title,
                job.company_id,
                job.location,
                job.status,
                job.url,
                job.notes,
                job.date_found,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_job(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM jobs WHERE job_id = ?1", [id])?;
        Ok(changed > 0)
    }

    fn row_to_job(row: &rusqlite::Row) -> rusqlite::Result<Job> {
        Ok(Job {
            id: row.get(0)?,
            title: row.get(1)?,
            company_id: row.get(2)?,
            company_name: row.get(3)?,
            location: row.get(4)?,
            status: row.get(5)?,
            url: row.get(6)?,
            notes: row.get(7)?,
            date_found: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    // --- Recruiter operations ---

    pub fn add_recruiter(&self, recruiter: &NewRecruiter) -> Result<i64> {
        Self::require("Recruiter name", &recruiter.name)?;
        self.conn.execute(
            "INSERT INTO recruiters (name, agency_company_id, contact_info, notes, first_contact_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                recruiter.name,
                recruiter.agency_company_id,
                recruiter.contact_info,
                recruiter.notes,
                recruiter.first_contact_date
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_recruiters(&self) -> Result<Vec<Recruiter>> {
        let sql = format!("{} ORDER BY r.name ASC", RECRUITER_SELECT);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_recruiter)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list recruiters")
    }

    pub fn get_recruiter(&self, id: i64) -> Result<Option<Recruiter>> {
        let sql = format!("{} WHERE r.recruiter_id = ?1", RECRUITER_SELECT);
        let result = self.conn.query_row(&sql, [id], Self::row_to_recruiter);
        match result {
            Ok(recruiter) => Ok(Some(recruiter)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn update_recruiter(&self, id: i64, recruiter: &NewRecruiter) -> Result<bool> {
        Self::require("Recruiter name", &recruiter.name)?;
        let changed = self.conn.execute(
            "UPDATE recruiters SET name = ?1, agency_company_id = ?2, contact_info = ?3,
                    notes = ?4, first_contact_date = ?5
             WHERE recruiter_id = ?6",
            params![
                recruiter.name,
                recruiter.agency_company_id,
                recruiter.contact_info,
                recruiter.notes,
                recruiter.first_contact_date,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_recruiter(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM recruiters WHERE recruiter_id = ?1", [id])?;
        Ok(changed > 0)
    }

    fn row_to_recruiter(row: &rusqlite::Row) -> rusqlite::Result<Recruiter> {
        Ok(Recruiter {
            id: row.get(0)?,
            name: row.get(1)?,
            agency_company_id: row.get(2)?,
            agency_name: row.get(3)?,
            contact_info: row.get(4)?,
            notes: row.get(5)?,
            first_contact_date: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    // --- Task operations ---

    pub fn add_task(&self, task: &NewTask) -> Result<i64> {
        Self::require("Task description", &task.description)?;
        Self::require("Task status", &task.status)?;
        self.conn.execute(
            "INSERT INTO tasks (task_description, due_date, status, priority, notes, job_id, recruiter_id, company_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.description,
                task.due_date,
                task.status,
                task.priority,
                task.notes,
                task.job_id,
                task.recruiter_id,
                task.company_id
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!(
            "{} ORDER BY t.due_date ASC NULLS LAST, t.status ASC, {} DESC NULLS LAST, t.created_at DESC",
            TASK_SELECT, PRIORITY_RANK
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_task)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list tasks")
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("{} WHERE t.task_id = ?1", TASK_SELECT);
        let result = self.conn.query_row(&sql, [id], Self::row_to_task);
        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn update_task(&self, id: i64, task: &NewTask) -> Result<bool> {
        Self::require("Task description", &task.description)?;
        Self::require("Task status", &task.status)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET task_description = ?1, due_date = ?2, status = ?3, priority = ?4,
                    notes = ?5, job_id = ?6, recruiter_id = ?7, company_id = ?8
             WHERE task_id = ?9",
            params![
                task.description,
                task.due_date,
                task.status,
                task.priority,
                task.notes,
                task.job_id,
                task.recruiter_id,
                task.company_id,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_task(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE task_id = ?1", [id])?;
        Ok(changed > 0)
    }

    fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            description: row.get(1)?,
            due_date: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            notes: row.get(5)?,
            job_id: row.get(6)?,
            job_title: row.get(7)?,
            recruiter_id: row.get(8)?,
            recruiter_name: row.get(9)?,
            company_id: row.get(10)?,
            company_name: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    // --- Dashboard queries ---

    pub fn total_jobs(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Counts over the full status vocabulary; statuses with no rows report 0.
    pub fn job_status_counts(&self) -> Result<Vec<(JobStatus, i64)>> {
        let mut counts: Vec<(JobStatus, i64)> =
            JobStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM jobs GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (status, count) = row?;
            if let Some(parsed) = JobStatus::parse(&status) {
                if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == parsed) {
                    entry.1 = count;
                }
            }
        }
        Ok(counts)
    }

    pub fn recent_companies(&self, limit: usize) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT company_id, company_name, sector, website, notes, source, created_at
             FROM companies ORDER BY created_at DESC, company_id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], Self::row_to_company)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list recent companies")
    }

    pub fn recent_recruiters(&self, limit: usize) -> Result<Vec<Recruiter>> {
        let sql = format!(
            "{} ORDER BY r.created_at DESC, r.recruiter_id DESC LIMIT ?1",
            RECRUITER_SELECT
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([limit as i64], Self::row_to_recruiter)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list recent recruiters")
    }

    /// Open tasks due soonest. Completed and Cancelled are excluded no matter
    /// the due date.
    pub fn upcoming_tasks(&self, limit: usize) -> Result<Vec<Task>> {
        let sql = format!(
            "{} WHERE t.status NOT IN ('Completed', 'Cancelled')
             ORDER BY t.due_date ASC NULLS LAST, {} ASC NULLS LAST, t.created_at ASC
             LIMIT ?1",
            TASK_SELECT, PRIORITY_RANK
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([limit as i64], Self::row_to_task)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to list upcoming tasks")
    }

    #[cfg(test)]
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        // test helper; table names come from the tests themselves
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    fn company(db: &Database, name: &str) -> i64 {
        db.add_company(&NewCompany {
            name: name.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn job(db: &Database, title: &str, company_id: i64, status: &str) -> i64 {
        db.add_job(&NewJob {
            title: title.to_string(),
            company_id,
            status: status.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_get_after_add_returns_payload() {
        let db = test_db();
        let id = db
            .add_company(&NewCompany {
                name: "Acme".to_string(),
                sector: Some("Robotics".to_string()),
                website: Some("https://acme.test".to_string()),
                notes: Some("met at fair".to_string()),
                source: Some("referral".to_string()),
            })
            .unwrap();

        let company = db.get_company(id).unwrap().unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.sector.as_deref(), Some("Robotics"));
        assert_eq!(company.website.as_deref(), Some("https://acme.test"));
        assert_eq!(company.notes.as_deref(), Some("met at fair"));
        assert_eq!(company.source.as_deref(), Some("referral"));
    }

    #[test]
    fn test_update_is_full_replace_not_patch() {
        let db = test_db();
        let id = db
            .add_company(&NewCompany {
                name: "Acme".to_string(),
                sector: Some("Robotics".to_string()),
                notes: Some("keep me?".to_string()),
                ..Default::default()
            })
            .unwrap();

        // Replacement row omits sector and notes; they must not survive.
        let updated = db
            .update_company(
                id,
                &NewCompany {
                    name: "Acme Corp".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated);

        let company = db.get_company(id).unwrap().unwrap();
        assert_eq!(company.name, "Acme Corp");
        assert_eq!(company.sector, None);
        assert_eq!(company.notes, None);
    }

    #[test]
    fn test_delete_makes_get_absent_and_list_shrinks() {
        let db = test_db();
        let id = company(&db, "Acme");
        assert!(db.delete_company(id).unwrap());
        assert!(db.get_company(id).unwrap().is_none());
        assert!(db.list_companies().unwrap().is_empty());
        // second delete is a soft failure, not an error
        assert!(!db.delete_company(id).unwrap());
    }

    #[test]
    fn test_update_missing_row_is_soft_failure() {
        let db = test_db();
        let updated = db
            .update_company(
                999,
                &NewCompany {
                    name: "Ghost".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_required_field_rejected_before_any_write() {
        let db = test_db();
        let before = db.count_rows("companies").unwrap();
        assert!(db
            .add_company(&NewCompany {
                name: "   ".to_string(),
                ..Default::default()
            })
            .is_err());
        assert_eq!(db.count_rows("companies").unwrap(), before);

        assert!(db
            .add_job(&NewJob {
                title: String::new(),
                company_id: 1,
                status: "Applied".to_string(),
                ..Default::default()
            })
            .is_err());
        assert_eq!(db.count_rows("jobs").unwrap(), 0);
    }

    #[test]
    fn test_job_list_carries_company_name() {
        let db = test_db();
        let comp = company(&db, "Acme");
        job(&db, "Engineer", comp, "Applied");

        let jobs = db.list_jobs(None).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_job_list_status_filter() {
        let db = test_db();
        let comp = company(&db, "Acme");
        job(&db, "A", comp, "Applied");
        job(&db, "B", comp, "Offer");

        let applied = db.list_jobs(Some("Applied")).unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].title, "A");
    }

    #[test]
    fn test_dangling_task_job_link_displays_as_unset() {
        let db = test_db();
        let comp = company(&db, "Acme");
        let job_id = job(&db, "Engineer", comp, "Applied");
        let task_id = db
            .add_task(&NewTask {
                description: "follow up".to_string(),
                status: "Open".to_string(),
                job_id: Some(job_id),
                ..Default::default()
            })
            .unwrap();

        // job deletion does not cascade; the task keeps the id but the
        // joined title resolves to nothing
        assert!(db.delete_job(job_id).unwrap());
        let task = db.get_task(task_id).unwrap().unwrap();
        assert_eq!(task.job_id, Some(job_id));
        assert_eq!(task.job_title, None);
    }

    #[test]
    fn test_new_company_flow_is_one_transaction() {
        let db = test_db();
        let (job_id, company_id) = db
            .add_job_with_new_company(
                &NewJob {
                    title: "Engineer".to_string(),
                    status: "Not Applied".to_string(),
                    ..Default::default()
                },
                "Fresh Co",
            )
            .unwrap();

        let job = db.get_job(job_id).unwrap().unwrap();
        assert_eq!(job.company_id, company_id);
        assert_eq!(job.company_name.as_deref(), Some("Fresh Co"));
        assert_eq!(db.count_rows("companies").unwrap(), 1);
    }

    #[test]
    fn test_new_company_flow_rolls_back_on_failure() {
        let db = test_db();
        // invalid status violates the CHECK constraint after the company
        // insert has already run; both rows must disappear
        let result = db.add_job_with_new_company(
            &NewJob {
                title: "Engineer".to_string(),
                status: "Bogus".to_string(),
                ..Default::default()
            },
            "Fresh Co",
        );
        assert!(result.is_err());
        assert_eq!(db.count_rows("companies").unwrap(), 0);
        assert_eq!(db.count_rows("jobs").unwrap(), 0);
    }

    #[test]
    fn test_same_new_name_twice_creates_two_companies() {
        let db = test_db();
        let (_, first) = db
            .add_job_with_new_company(
                &NewJob {
                    title: "Engineer".to_string(),
                    status: "Not Applied".to_string(),
                    ..Default::default()
                },
                "Fresh Co",
            )
            .unwrap();
        let (_, second) = db
            .add_job_with_new_company(
                &NewJob {
                    title: "Analyst".to_string(),
                    status: "Not Applied".to_string(),
                    ..Default::default()
                },
                "Fresh Co",
            )
            .unwrap();

        // name is not unique by constraint; no deduplication happens
        assert_ne!(first, second);
        assert_eq!(db.count_rows("companies").unwrap(), 2);
    }

    #[test]
    fn test_status_counts_are_zero_filled() {
        let db = test_db();
        let comp = company(&db, "Acme");
        for status in ["Applied", "Applied", "Interviewing", "Offer", "Not Applied"] {
            job(&db, "role", comp, status);
        }

        let counts = db.job_status_counts().unwrap();
        let get = |s: JobStatus| counts.iter().find(|(st, _)| *st == s).unwrap().1;
        assert_eq!(get(JobStatus::NotApplied), 1);
        assert_eq!(get(JobStatus::Applied), 2);
        assert_eq!(get(JobStatus::Interviewing), 1);
        assert_eq!(get(JobStatus::Offer), 1);
        assert_eq!(get(JobStatus::Rejected), 0);
        assert_eq!(db.total_jobs().unwrap(), 5);
    }

    #[test]
    fn test_upcoming_tasks_exclude_closed_statuses() {
        let db = test_db();
        for (desc, status, due) in [
            ("done long ago", "Completed", Some("2020-01-01")),
            ("cancelled", "Cancelled", Some("2020-01-02")),
            ("soon", "Open", Some("2030-01-01")),
            ("later", "In Progress", Some("2030-06-01")),
            ("no due date", "Awaiting Feedback", None),
        ] {
            db.add_task(&NewTask {
                description: desc.to_string(),
                status: status.to_string(),
                due_date: due.map(date),
                ..Default::default()
            })
            .unwrap();
        }

        let upcoming = db.upcoming_tasks(5).unwrap();
        let descriptions: Vec<&str> =
            upcoming.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["soon", "later", "no due date"]);
    }

    #[test]
    fn test_task_list_order_due_dates_null_last() {
        let db = test_db();
        for (desc, due) in [
            ("undated", None),
            ("second", Some("2030-02-01")),
            ("first", Some("2030-01-01")),
        ] {
            db.add_task(&NewTask {
                description: desc.to_string(),
                status: "Open".to_string(),
                due_date: due.map(date),
                ..Default::default()
            })
            .unwrap();
        }

        let tasks = db.list_tasks().unwrap();
        let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "undated"]);
    }

    #[test]
    fn test_upcoming_tasks_priority_breaks_due_date_ties() {
        let db = test_db();
        for (desc, prio) in [("low", Some("Low")), ("none", None), ("high", Some("High"))] {
            db.add_task(&NewTask {
                description: desc.to_string(),
                status: "Open".to_string(),
                due_date: Some(date("2030-01-01")),
                priority: prio.map(str::to_string),
                ..Default::default()
            })
            .unwrap();
        }

        // rank ascending, NULL priority last
        let upcoming = db.upcoming_tasks(5).unwrap();
        let descriptions: Vec<&str> =
            upcoming.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["low", "high", "none"]);
    }

    #[test]
    fn test_recent_companies_limit_and_order() {
        let db = test_db();
        let a = company(&db, "Alpha");
        let b = company(&db, "Beta");
        let c = company(&db, "Gamma");

        let recent = db.recent_companies(2).unwrap();
        assert_eq!(recent.len(), 2);
        // identical created_at seconds resolve by rowid, newest first
        assert_eq!(recent[0].id, c);
        assert_eq!(recent[1].id, b);
        assert!(recent.iter().all(|r| r.id != a));
    }

    #[test]
    fn test_task_full_replace_clears_links() {
        let db = test_db();
        let comp = company(&db, "Acme");
        let task_id = db
            .add_task(&NewTask {
                description: "ping recruiter".to_string(),
                status: "Open".to_string(),
                priority: Some("High".to_string()),
                company_id: Some(comp),
                ..Default::default()
            })
            .unwrap();

        let updated = db
            .update_task(
                task_id,
                &NewTask {
                    description: "ping recruiter".to_string(),
                    status: "Completed".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated);

        let task = db.get_task(task_id).unwrap().unwrap();
        assert_eq!(task.status, "Completed");
        assert_eq!(task.priority, None);
        assert_eq!(task.company_id, None);
        assert_eq!(task.company_name, None);
    }

    #[test]
    fn test_recruiter_agency_is_optional() {
        let db = test_db();
        let comp = company(&db, "Agency Inc");
        let with_agency = db
            .add_recruiter(&NewRecruiter {
                name: "Sam".to_string(),
                agency_company_id: Some(comp),
                ..Default::default()
            })
            .unwrap();
        let without = db
            .add_recruiter(&NewRecruiter {
                name: "Alex".to_string(),
                ..Default::default()
            })
            .unwrap();

        let sam = db.get_recruiter(with_agency).unwrap().unwrap();
        assert_eq!(sam.agency_name.as_deref(), Some("Agency Inc"));
        let alex = db.get_recruiter(without).unwrap().unwrap();
        assert_eq!(alex.agency_company_id, None);
        assert_eq!(alex.agency_name, None);

        // name ascending
        let all = db.list_recruiters().unwrap();
        assert_eq!(all[0].name, "Alex");
        assert_eq!(all[1].name, "Sam");
    }
}
