//! Company records and their CRUD operations.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::client::{GenericClient, trace_sql};
use crate::error::{Error, Result};
use crate::row::{FromRow, RowExt};
use crate::update::{SetClause, UpdateFields, set_clause};
use crate::value::{FieldValue, Patch, as_params};

/// Wire field name → column name for company PATCH payloads.
///
/// Fixed at compile time; this table is the only source of column names the
/// SET-clause builder ever sees for companies.
const COMPANY_COLUMNS: &[(&str, &str)] =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

const COMPANY_RETURNING: &str = "handle, name, description, num_employees, logo_url";

/// A company row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            handle: row.decode("handle")?,
            name: row.decode("name")?,
            description: row.decode("description")?,
            num_employees: row.decode("num_employees")?,
            logo_url: row.decode("logo_url")?,
        })
    }
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Sparse PATCH payload for a company.
///
/// `handle` is the row key and is not patchable; an unknown key (including
/// `handle`) rejects the whole payload at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub num_employees: Patch<i32>,
    #[serde(default)]
    pub logo_url: Patch<String>,
}

impl CompanyPatch {
    fn into_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_patch("name", self.name)
            .set_patch("description", self.description)
            .set_patch("numEmployees", self.num_employees)
            .set_patch("logoUrl", self.logo_url)
    }
}

/// Optional search criteria for listing companies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    fn where_clause(&self) -> Result<(String, Vec<FieldValue>)> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(Error::bad_request(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }

        let mut conditions = Vec::new();
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(FieldValue::from(format!("%{name}%")));
            conditions.push(format!("name ILIKE ${}", params.len()));
        }
        if let Some(min) = self.min_employees {
            params.push(FieldValue::from(min));
            conditions.push(format!("num_employees >= ${}", params.len()));
        }
        if let Some(max) = self.max_employees {
            params.push(FieldValue::from(max));
            conditions.push(format!("num_employees <= ${}", params.len()));
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        Ok((sql, params))
    }
}

fn update_sql(set: &str, key_index: usize) -> String {
    format!("UPDATE companies SET {set} WHERE handle = ${key_index} RETURNING {COMPANY_RETURNING}")
}

impl Company {
    /// Insert a company and return the stored row.
    ///
    /// A duplicate handle fails with a bad-request error.
    pub async fn create(client: &impl GenericClient, company: NewCompany) -> Result<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_RETURNING}"
        );
        let params = vec![
            FieldValue::from(company.handle.clone()),
            FieldValue::from(company.name),
            FieldValue::from(company.description),
            FieldValue::from(company.num_employees),
            FieldValue::from(company.logo_url),
        ];
        trace_sql("company.create", &sql, params.len());
        match client.query_one(&sql, &as_params(&params)).await {
            Ok(row) => Company::from_row(&row),
            Err(err) if err.is_unique_violation() => Err(Error::bad_request(format!(
                "Duplicate company: {}",
                company.handle
            ))),
            Err(err) => Err(err),
        }
    }

    /// List companies matching the filter, ordered by name.
    pub async fn find_all(
        client: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> Result<Vec<Company>> {
        let (where_sql, params) = filter.where_clause()?;
        let sql = format!("SELECT {COMPANY_RETURNING} FROM companies{where_sql} ORDER BY name");
        trace_sql("company.find_all", &sql, params.len());
        let rows = client.query(&sql, &as_params(&params)).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch one company by handle.
    pub async fn get(client: &impl GenericClient, handle: &str) -> Result<Company> {
        let sql = format!("SELECT {COMPANY_RETURNING} FROM companies WHERE handle = $1");
        trace_sql("company.get", &sql, 1);
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| Error::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Apply a partial update and return the stored row.
    ///
    /// Only the supplied fields change; an empty patch fails with
    /// [`Error::EmptyUpdate`] before any I/O.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        patch: CompanyPatch,
    ) -> Result<Company> {
        let SetClause { sql: set, mut params } = set_clause(patch.into_fields(), COMPANY_COLUMNS)?;
        params.push(FieldValue::from(handle));
        let sql = update_sql(&set, params.len());
        trace_sql("company.update", &sql, params.len());
        let row = client
            .query_opt(&sql, &as_params(&params))
            .await?
            .ok_or_else(|| Error::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company (and, via cascade, its jobs).
    pub async fn remove(client: &impl GenericClient, handle: &str) -> Result<()> {
        let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
        trace_sql("company.remove", sql, 1);
        client
            .query_opt(sql, &[&handle])
            .await?
            .ok_or_else(|| Error::not_found(format!("No company: {handle}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (sql, params) = CompanyFilter::default().where_clause().unwrap();
        assert_eq!(sql, "");
        assert!(params.is_empty());
    }

    #[test]
    fn filter_conditions_number_params_in_order() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let (sql, params) = filter.where_clause().unwrap();
        assert_eq!(
            sql,
            " WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            params,
            vec![
                FieldValue::Text("%net%".into()),
                FieldValue::Int(10),
                FieldValue::Int(500)
            ]
        );
    }

    #[test]
    fn filter_with_single_criterion_starts_at_one() {
        let filter = CompanyFilter {
            max_employees: Some(50),
            ..Default::default()
        };
        let (sql, params) = filter.where_clause().unwrap();
        assert_eq!(sql, " WHERE num_employees <= $1");
        assert_eq!(params, vec![FieldValue::Int(50)]);
    }

    #[test]
    fn inverted_employee_range_is_rejected() {
        let filter = CompanyFilter {
            min_employees: Some(100),
            max_employees: Some(10),
            ..Default::default()
        };
        let err = filter.where_clause().unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn patch_builds_translated_set_clause() {
        let patch: CompanyPatch =
            serde_json::from_str(r#"{"name": "NewCo", "numEmployees": 42, "logoUrl": null}"#)
                .unwrap();
        let clause = set_clause(patch.into_fields(), COMPANY_COLUMNS).unwrap();
        assert_eq!(clause.sql, r#""name"=$1, "num_employees"=$2, "logo_url"=$3"#);
        assert_eq!(
            clause.params,
            vec![
                FieldValue::Text("NewCo".into()),
                FieldValue::Int(42),
                FieldValue::Null
            ]
        );
    }

    #[test]
    fn update_statement_appends_key_after_set_params() {
        let patch: CompanyPatch = serde_json::from_str(r#"{"name": "NewCo"}"#).unwrap();
        let clause = set_clause(patch.into_fields(), COMPANY_COLUMNS).unwrap();
        assert_eq!(
            update_sql(&clause.sql, clause.params.len() + 1),
            "UPDATE companies SET \"name\"=$1 WHERE handle = $2 \
             RETURNING handle, name, description, num_employees, logo_url"
        );
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        assert!(serde_json::from_str::<CompanyPatch>(r#"{"handle": "c1-new"}"#).is_err());
    }

    struct PanicClient;

    impl GenericClient for PanicClient {
        async fn query(
            &self,
            _sql: &str,
            _params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
        ) -> Result<Vec<Row>> {
            panic!("unexpected query")
        }

        async fn query_opt(
            &self,
            _sql: &str,
            _params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
        ) -> Result<Option<Row>> {
            panic!("unexpected query")
        }

        async fn execute(
            &self,
            _sql: &str,
            _params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
        ) -> Result<u64> {
            panic!("unexpected statement")
        }
    }

    #[tokio::test]
    async fn empty_patch_never_reaches_the_database() {
        let err = Company::update(&PanicClient, "c1", CompanyPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyUpdate));
    }

    #[tokio::test]
    async fn inverted_filter_range_never_reaches_the_database() {
        let filter = CompanyFilter {
            min_employees: Some(100),
            max_employees: Some(10),
            ..Default::default()
        };
        let err = Company::find_all(&PanicClient, &filter).await.unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn company_serializes_with_wire_names() {
        let company = Company {
            handle: "c1".into(),
            name: "C1".into(),
            description: "Desc1".into(),
            num_employees: Some(1),
            logo_url: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 1);
        assert!(json["logoUrl"].is_null());
    }
}
