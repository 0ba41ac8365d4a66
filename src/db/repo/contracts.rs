//! Contract numbering and reporting.

use super::Repository;
use crate::domain::{Amount, Contract, ContractStatus, Filter, Record, RecordId};
use crate::error::StoreResult;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractStatistics {
    pub total: usize,
    pub by_status: BTreeMap<ContractStatus, usize>,
    /// Sum of `value` over active contracts.
    pub active_value: Amount,
}

impl Repository<Contract> {
    /// Next global contract number (`CON-001`, `CON-002`, ...).
    ///
    /// Scan-then-increment: only safe with a single writer.
    pub async fn generate_contract_number(&self) -> StoreResult<String> {
        let existing = self.field_values(&Filter::new(), "contractNumber").await?;
        Ok(Contract::number_format().next(existing.iter().map(String::as_str)))
    }

    pub async fn for_project(&self, project_id: RecordId) -> StoreResult<Vec<Record<Contract>>> {
        self.get_all(&Filter::new().eq("projectId", project_id)).await
    }

    pub async fn for_employee(&self, employee_id: RecordId) -> StoreResult<Vec<Record<Contract>>> {
        self.get_all(&Filter::new().eq("employeeId", employee_id)).await
    }

    /// Active contracts whose end date falls within `days` days of `today`.
    ///
    /// A horizon past the calendar range is clamped to the last representable
    /// date. Negative `days` match nothing.
    pub async fn expiring_within(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> StoreResult<Vec<Record<Contract>>> {
        let horizon = Duration::try_days(days)
            .and_then(|span| today.checked_add_signed(span))
            .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
        Ok(self
            .get_all(&Filter::new().eq("status", "active"))
            .await?
            .into_iter()
            .filter(|c| c.ends_between(today, horizon))
            .collect())
    }

    pub async fn statistics(&self) -> StoreResult<ContractStatistics> {
        let contracts = self.list().await?;
        let mut stats = ContractStatistics {
            total: contracts.len(),
            ..Default::default()
        };
        for contract in &contracts {
            *stats.by_status.entry(contract.status).or_insert(0) += 1;
            if contract.status == ContractStatus::Active {
                stats.active_value += contract.value;
            }
        }
        Ok(stats)
    }
}
