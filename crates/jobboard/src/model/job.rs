//! Job records and their CRUD operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::client::{GenericClient, trace_sql};
use crate::error::{Error, Result};
use crate::row::{FromRow, RowExt};
use crate::update::{SetClause, UpdateFields, set_clause};
use crate::value::{FieldValue, Patch, as_params};

/// Job PATCH fields already match their column names; the builder falls
/// back to the field name for anything not listed here.
const JOB_COLUMNS: &[(&str, &str)] = &[];

const JOB_RETURNING: &str = "id, title, salary, equity, company_handle";

/// A job row. `equity` is a NUMERIC in `0..=1`, kept exact as a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.decode("id")?,
            title: row.decode("title")?,
            salary: row.decode("salary")?,
            equity: row.decode("equity")?,
            company_handle: row.decode("company_handle")?,
        })
    }
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Sparse PATCH payload for a job.
///
/// `id` and `companyHandle` are not patchable; unknown keys reject the
/// whole payload at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub salary: Patch<i32>,
    #[serde(default)]
    pub equity: Patch<Decimal>,
}

impl JobPatch {
    fn into_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_patch("title", self.title)
            .set_patch("salary", self.salary)
            .set_patch("equity", self.equity)
    }
}

/// Optional search criteria for listing jobs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title.
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// `true` restricts to jobs with a non-zero equity share; `false` and
    /// absent are equivalent.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    fn where_clause(&self) -> (String, Vec<FieldValue>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        if let Some(title) = &self.title {
            params.push(FieldValue::from(format!("%{title}%")));
            conditions.push(format!("title ILIKE ${}", params.len()));
        }
        if let Some(min) = self.min_salary {
            params.push(FieldValue::from(min));
            conditions.push(format!("salary >= ${}", params.len()));
        }
        if self.has_equity == Some(true) {
            conditions.push("equity > 0".to_string());
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        (sql, params)
    }
}

fn update_sql(set: &str, key_index: usize) -> String {
    format!("UPDATE jobs SET {set} WHERE id = ${key_index} RETURNING {JOB_RETURNING}")
}

impl Job {
    /// Insert a job and return the stored row.
    ///
    /// A nonexistent company handle surfaces as a foreign-key violation.
    pub async fn create(client: &impl GenericClient, job: NewJob) -> Result<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_RETURNING}"
        );
        let params = vec![
            FieldValue::from(job.title),
            FieldValue::from(job.salary),
            FieldValue::from(job.equity),
            FieldValue::from(job.company_handle),
        ];
        trace_sql("job.create", &sql, params.len());
        let row = client.query_one(&sql, &as_params(&params)).await?;
        Job::from_row(&row)
    }

    /// List jobs matching the filter, ordered by title.
    pub async fn find_all(client: &impl GenericClient, filter: &JobFilter) -> Result<Vec<Job>> {
        let (where_sql, params) = filter.where_clause();
        let sql = format!("SELECT {JOB_RETURNING} FROM jobs{where_sql} ORDER BY title");
        trace_sql("job.find_all", &sql, params.len());
        let rows = client.query(&sql, &as_params(&params)).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Fetch one job by id.
    pub async fn get(client: &impl GenericClient, id: i32) -> Result<Job> {
        let sql = format!("SELECT {JOB_RETURNING} FROM jobs WHERE id = $1");
        trace_sql("job.get", &sql, 1);
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| Error::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// List one company's jobs, oldest first.
    pub async fn find_by_company(client: &impl GenericClient, handle: &str) -> Result<Vec<Job>> {
        let sql = format!("SELECT {JOB_RETURNING} FROM jobs WHERE company_handle = $1 ORDER BY id");
        trace_sql("job.find_by_company", &sql, 1);
        let rows = client.query(&sql, &[&handle]).await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Apply a partial update and return the stored row.
    ///
    /// Only the supplied fields change; an empty patch fails with
    /// [`Error::EmptyUpdate`] before any I/O.
    pub async fn update(client: &impl GenericClient, id: i32, patch: JobPatch) -> Result<Job> {
        let SetClause { sql: set, mut params } = set_clause(patch.into_fields(), JOB_COLUMNS)?;
        params.push(FieldValue::from(id));
        let sql = update_sql(&set, params.len());
        trace_sql("job.update", &sql, params.len());
        let row = client
            .query_opt(&sql, &as_params(&params))
            .await?
            .ok_or_else(|| Error::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job.
    pub async fn remove(client: &impl GenericClient, id: i32) -> Result<()> {
        let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
        trace_sql("job.remove", sql, 1);
        client
            .query_opt(sql, &[&id])
            .await?
            .ok_or_else(|| Error::not_found(format!("No job: {id}")))?;
        Ok(())
    }
}
