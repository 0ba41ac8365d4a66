//! Projects and their budget amendments.

use super::{Amount, Entity, Labeled, RecordId, Sort};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
    Suspended,
}

/// A donor-funded programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub donor_id: RecordId,
    pub project_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_budget: Amount,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Project {
    pub fn new(donor_id: RecordId, project_code: impl Into<String>, total_budget: Amount) -> Self {
        Self {
            donor_id,
            project_code: project_code.into(),
            name: String::new(),
            description: None,
            start_date: None,
            end_date: None,
            total_budget,
            status: ProjectStatus::Planning,
        }
    }
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const SEARCH_FIELDS: &'static [&'static str] = &["projectCode", "name"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::asc("projectCode"));
}

impl Labeled for Project {
    fn label(&self) -> String {
        self.project_code.clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentStatus {
    #[default]
    Draft,
    Approved,
    Rejected,
}

/// A numbered change to a project's budget or dates.
///
/// `amendment_number` counts from 1 within its project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amendment {
    pub project_id: RecordId,
    pub amendment_number: u32,
    pub amendment_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget_change: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: AmendmentStatus,
}

impl Entity for Amendment {
    const COLLECTION: &'static str = "amendments";
    const SEARCH_FIELDS: &'static [&'static str] = &["description"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::asc("amendmentNumber"));
}

impl Labeled for Amendment {
    fn label(&self) -> String {
        format!("Amendment #{}", self.amendment_number)
    }
}
