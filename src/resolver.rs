//! Name-to-id lookup tables for selection inputs.
//!
//! Foreign keys are chosen by display name, so each table gets a snapshot
//! map of name -> id, headed by a reserved "unselected" placeholder that
//! resolves to nothing. Matches are exact and case-sensitive; with duplicate
//! names the first row in list order wins.

use anyhow::{anyhow, Result};
use std::time::{Duration, Instant};

use crate::db::Database;
use crate::models::NewJob;

pub const SELECT_COMPANY: &str = "--- Select Company ---";
pub const SELECT_JOB: &str = "--- Select Job ---";
pub const SELECT_RECRUITER: &str = "--- Select Recruiter ---";

/// How long a loaded snapshot is served before re-reading the tables.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// One selection map: placeholder entry first, then (name, Some(id)) pairs
/// in table list order.
#[derive(Debug, Clone)]
pub struct RefMap {
    entries: Vec<(String, Option<i64>)>,
}

impl RefMap {
    pub fn build(placeholder: &str, rows: Vec<(i64, String)>) -> Self {
        let mut entries = Vec::with_capacity(rows.len() + 1);
        entries.push((placeholder.to_string(), None));
        for (id, name) in rows {
            entries.push((name, Some(id)));
        }
        Self { entries }
    }

    /// Exact, case-sensitive match. The placeholder (and unknown names)
    /// resolve to None; first match wins when names repeat.
    pub fn id_for(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, id)| *id)
    }
}

/// Snapshot of the three selection maps, refreshed on a short interval so
/// repeated interactions do not re-query every table each time.
pub struct RefCache {
    companies: RefMap,
    jobs: RefMap,
    recruiters: RefMap,
    loaded_at: Instant,
}

impl RefCache {
    pub fn load(db: &Database) -> Result<Self> {
        let companies = db
            .list_companies()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let jobs = db
            .list_jobs(None)?
            .into_iter()
            .map(|j| (j.id, j.title))
            .collect();
        let recruiters = db
            .list_recruiters()?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        Ok(Self {
            companies: RefMap::build(SELECT_COMPANY, companies),
            jobs: RefMap::build(SELECT_JOB, jobs),
            recruiters: RefMap::build(SELECT_RECRUITER, recruiters),
            loaded_at: Instant::now(),
        })
    }

    pub fn refresh_if_stale(&mut self, db: &Database) -> Result<()> {
        if self.loaded_at.elapsed() >= CACHE_TTL {
            *self = Self::load(db)?;
        }
        Ok(())
    }

    pub fn company_id(&self, name: &str) -> Result<i64> {
        self.companies
            .id_for(name)
            .ok_or_else(|| anyhow!("Unknown company '{}'", name))
    }

    pub fn job_id(&self, name: &str) -> Result<i64> {
        self.jobs
            .id_for(name)
            .ok_or_else(|| anyhow!("Unknown job '{}'", name))
    }

    pub fn recruiter_id(&self, name: &str) -> Result<i64> {
        self.recruiters
            .id_for(name)
            .ok_or_else(|| anyhow!("Unknown recruiter '{}'", name))
    }
}

/// How the user picked a company for a job: an existing name, a brand-new
/// name typed in the sibling field, or nothing.
#[derive(Debug, Clone)]
pub enum CompanyChoice {
    Existing(String),
    New(String),
    Unselected,
}

impl CompanyChoice {
    pub fn from_args(existing: Option<String>, new: Option<String>) -> Self {
        // a typed new name takes precedence, mirroring the form behavior
        match (new, existing) {
            (Some(name), _) if !name.trim().is_empty() => CompanyChoice::New(name),
            (_, Some(name)) if !name.trim().is_empty() => CompanyChoice::Existing(name),
            _ => CompanyChoice::Unselected,
        }
    }
}

/// Resolves the company choice and inserts the job. An unresolved choice is
/// a validation error raised before any write; a new name routes through the
/// transactional company+job insert so neither row survives a failure.
pub fn insert_job(
    db: &Database,
    cache: &mut RefCache,
    mut job: NewJob,
    choice: &CompanyChoice,
) -> Result<i64> {
    cache.refresh_if_stale(db)?;
    match choice {
        CompanyChoice::Unselected => Err(anyhow!(
            "A company is required: select an existing one or give a new name"
        )),
        CompanyChoice::Existing(name) => {
            job.company_id = cache.company_id(name)?;
            db.add_job(&job)
        }
        CompanyChoice::New(name) => db
            .add_job_with_new_company(&job, name)
            .map(|(job_id, _)| job_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCompany;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    fn add_company(db: &Database, name: &str) -> i64 {
        db.add_company(&NewCompany {
            name: name.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            status: "Not Applied".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_resolves_to_none() {
        let map = RefMap::build(SELECT_COMPANY, vec![(1, "Acme".to_string())]);
        assert_eq!(map.id_for(SELECT_COMPANY), None);
        assert_eq!(map.id_for("Acme"), Some(1));
    }

    #[test]
    fn test_lookup_is_case_sensitive_exact() {
        let map = RefMap::build(SELECT_COMPANY, vec![(1, "Acme".to_string())]);
        assert_eq!(map.id_for("acme"), None);
        assert_eq!(map.id_for("Acme "), None);
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let map = RefMap::build(
            SELECT_COMPANY,
            vec![(1, "Acme".to_string()), (2, "Acme".to_string())],
        );
        assert_eq!(map.id_for("Acme"), Some(1));
    }

    #[test]
    fn test_cache_loads_all_three_maps() {
        let db = test_db();
        let comp = add_company(&db, "Acme");
        db.add_job(&NewJob {
            title: "Engineer".to_string(),
            company_id: comp,
            status: "Applied".to_string(),
            ..Default::default()
        })
        .unwrap();

        let cache = RefCache::load(&db).unwrap();
        assert_eq!(cache.company_id("Acme").unwrap(), comp);
        assert!(cache.job_id("Engineer").is_ok());
        assert!(cache.recruiter_id("Nobody").is_err());
    }

    #[test]
    fn test_company_choice_precedence() {
        assert!(matches!(
            CompanyChoice::from_args(Some("Acme".into()), Some("Fresh".into())),
            CompanyChoice::New(_)
        ));
        assert!(matches!(
            CompanyChoice::from_args(Some("Acme".into()), None),
            CompanyChoice::Existing(_)
        ));
        assert!(matches!(
            CompanyChoice::from_args(None, Some("  ".into())),
            CompanyChoice::Unselected
        ));
        assert!(matches!(
            CompanyChoice::from_args(None, None),
            CompanyChoice::Unselected
        ));
    }

    #[test]
    fn test_unselected_company_rejected_before_any_write() {
        let db = test_db();
        let mut cache = RefCache::load(&db).unwrap();

        let result = insert_job(&db, &mut cache, new_job("Engineer"), &CompanyChoice::Unselected);
        assert!(result.is_err());
        assert!(db.list_jobs(None).unwrap().is_empty());
        assert!(db.list_companies().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_existing_name_rejected_before_any_write() {
        let db = test_db();
        let mut cache = RefCache::load(&db).unwrap();

        let result = insert_job(
            &db,
            &mut cache,
            new_job("Engineer"),
            &CompanyChoice::Existing("Nowhere Inc".to_string()),
        );
        assert!(result.is_err());
        assert!(db.list_jobs(None).unwrap().is_empty());
    }

    #[test]
    fn test_existing_choice_uses_mapped_id() {
        let db = test_db();
        let comp = add_company(&db, "Acme");
        let mut cache = RefCache::load(&db).unwrap();

        let job_id = insert_job(
            &db,
            &mut cache,
            new_job("Engineer"),
            &CompanyChoice::Existing("Acme".to_string()),
        )
        .unwrap();
        let job = db.get_job(job_id).unwrap().unwrap();
        assert_eq!(job.company_id, comp);
    }

    #[test]
    fn test_new_choice_creates_exactly_one_company() {
        let db = test_db();
        let mut cache = RefCache::load(&db).unwrap();

        let job_id = insert_job(
            &db,
            &mut cache,
            new_job("Engineer"),
            &CompanyChoice::New("Fresh Co".to_string()),
        )
        .unwrap();

        let companies = db.list_companies().unwrap();
        assert_eq!(companies.len(), 1);
        let job = db.get_job(job_id).unwrap().unwrap();
        assert_eq!(job.company_id, companies[0].id);
    }
}
