//! Data-access models for companies and jobs.
//!
//! Every operation takes any [`GenericClient`](crate::GenericClient) — a
//! plain connection, a pooled client, or a transaction.

pub mod company;
pub mod job;

pub use company::{Company, CompanyFilter, CompanyPatch, NewCompany};
pub use job::{Job, JobFilter, JobPatch, NewJob};
