//! Donor records.

use super::{Entity, Labeled};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorStatus {
    #[default]
    Active,
    Inactive,
}

/// A funding organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub status: DonorStatus,
}

impl Donor {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            donor_type: None,
            contact_person: None,
            email: None,
            country: None,
            status: DonorStatus::Active,
        }
    }
}

impl Entity for Donor {
    const COLLECTION: &'static str = "donors";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "country"];
}

impl Labeled for Donor {
    fn label(&self) -> String {
        self.name.clone()
    }
}
