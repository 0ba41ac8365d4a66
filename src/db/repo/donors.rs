//! Donor lookups.

use super::Repository;
use crate::domain::{Donor, Filter, Record};
use crate::error::StoreResult;

impl Repository<Donor> {
    /// Case-insensitive lookup by donor code.
    pub async fn find_by_code(&self, code: &str) -> StoreResult<Option<Record<Donor>>> {
        let wanted = code.trim();
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|d| d.code.eq_ignore_ascii_case(wanted)))
    }

    pub async fn active(&self) -> StoreResult<Vec<Record<Donor>>> {
        self.get_all(&Filter::new().eq("status", "active")).await
    }
}
