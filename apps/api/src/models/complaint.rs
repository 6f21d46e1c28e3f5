//! Persisted complaint record and its two audience-scoped projections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::Department;

/// Initial status of every newly filed complaint.
pub const STATUS_PENDING: &str = "Pending";

/// What the filing student sees: their own text, when it was filed, and where
/// it stands. Status is the only field that changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentView {
    pub complaint: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

/// What complaint officers see: every enrichment output alongside the raw text.
/// Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminView {
    pub timestamp: DateTime<Utc>,
    pub severity: u8,
    pub summary: String,
    pub complaint: String,
    pub departments: Vec<Department>,
    pub contacts: BTreeMap<Department, String>,
    pub suggestions: Vec<String>,
    pub institute: String,
    pub officer_brief: String,
}

/// One fully-enriched complaint, as stored and as returned from `/process`.
///
/// The id is assigned by the store at append time; a record is never
/// persisted partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id: u64,
    pub student_view: StudentView,
    pub admin_view: AdminView,
}
