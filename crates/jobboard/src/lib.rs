//! # jobboard
//!
//! PostgreSQL data-access layer for a company and job listings service.
//!
//! ## Features
//!
//! - **Partial updates**: PATCH payloads become parameterized `SET` clauses
//!   (`"col1"=$1, "col2"=$2`) with a positionally matched value list — see
//!   [`set_clause`]
//! - **Tri-state PATCH fields**: [`Patch`] keeps "not supplied" distinct
//!   from an explicit SQL NULL
//! - **Type-safe mapping**: Row → Struct via the [`FromRow`] trait
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//! - **Filtered listings**: ad-hoc search criteria compile to positional
//!   WHERE clauses, never string-interpolated values
//!
//! ## Example
//!
//! ```ignore
//! use jobboard::{Company, CompanyPatch, Config};
//!
//! let pool = Config::from_env()?.create_pool()?;
//! let client = pool.get().await?;
//!
//! let patch: CompanyPatch = serde_json::from_str(r#"{"numEmployees": 42}"#)?;
//! let company = Company::update(&client, "acme", patch).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod row;
pub mod update;
pub mod value;

pub use client::GenericClient;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{
    Company, CompanyFilter, CompanyPatch, Job, JobFilter, JobPatch, NewCompany, NewJob,
};
pub use row::{FromRow, RowExt};
pub use update::{SetClause, UpdateFields, set_clause};
pub use value::{FieldValue, Patch, as_params};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
