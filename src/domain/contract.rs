//! Contracts, numbered globally as `CON-001`, `CON-002`, ...

use super::{Amount, DisplayNumberFormat, Entity, Labeled, RecordId, Sort};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Expired,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub value: Amount,
    #[serde(default)]
    pub status: ContractStatus,
}

impl Contract {
    pub fn number_format() -> DisplayNumberFormat {
        DisplayNumberFormat::new("CON-", 3)
    }

    /// True when the contract ends within `[from, to]` (inclusive).
    pub fn ends_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end >= from && end <= to)
    }
}

impl Entity for Contract {
    const COLLECTION: &'static str = "contracts";
    const SEARCH_FIELDS: &'static [&'static str] = &["contractNumber", "title", "contractType"];
    const DEFAULT_SORT: Option<Sort> = Some(Sort::desc("startDate"));
}

impl Labeled for Contract {
    fn label(&self) -> String {
        self.contract_number.clone()
    }
}
