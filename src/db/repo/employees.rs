//! Employee directory queries.

use super::Repository;
use crate::domain::{Employee, Filter, Record};
use crate::error::StoreResult;
use std::collections::BTreeMap;

impl Repository<Employee> {
    pub async fn active(&self) -> StoreResult<Vec<Record<Employee>>> {
        self.get_all(&Filter::new().eq("status", "active")).await
    }

    pub async fn in_department(&self, department: &str) -> StoreResult<Vec<Record<Employee>>> {
        self.get_all(&Filter::new().eq("department", department)).await
    }

    /// Head count per department (employees of any status).
    pub async fn headcount_by_department(&self) -> StoreResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for employee in self.list().await? {
            *counts.entry(employee.department.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
