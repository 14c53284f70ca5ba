use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub sector: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company_id: i64,
    pub company_name: Option<String>, // denormalized for display
    pub location: Option<String>,
    pub status: String, // "Not Applied", "Applied", "Interviewing", "Rejected", "Offer"
    pub url: Option<String>,
    pub notes: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recruiter {
    pub id: i64,
    pub name: String,
    pub agency_company_id: Option<i64>,
    pub agency_name: Option<String>, // denormalized for display
    pub contact_info: Option<String>,
    pub notes: Option<String>,
    pub first_contact_date: Option<NaiveDate>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: String, // "Open", "In Progress", "Awaiting Feedback", "Completed", "Cancelled"
    pub priority: Option<String>, // "Low", "Medium", "High" or NULL
    pub notes: Option<String>,
    pub job_id: Option<i64>,
    pub job_title: Option<String>,
    pub recruiter_id: Option<i64>,
    pub recruiter_name: Option<String>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub created_at: String,
}

// Write payloads. Inserts and updates take the full record; an update
// replaces every column, it is not a patch.

#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub sector: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub title: String,
    pub company_id: i64,
    pub location: Option<String>,
    pub status: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub date_found: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct NewRecruiter {
    pub name: String,
    pub agency_company_id: Option<i64>,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
    pub first_contact_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub job_id: Option<i64>,
    pub recruiter_id: Option<i64>,
    pub company_id: Option<i64>,
}
