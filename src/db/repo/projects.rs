//! Project and amendment helpers.

use super::Repository;
use crate::domain::{
    next_number, Amendment, AmendmentStatus, Amount, Filter, Project, ProjectStatus, Record,
    RecordId,
};
use crate::error::StoreResult;
use std::collections::BTreeMap;

/// Portfolio rollup shown on the projects dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStatistics {
    pub total: usize,
    pub by_status: BTreeMap<ProjectStatus, usize>,
    pub total_budget: Amount,
}

impl Repository<Project> {
    /// Projects funded by one donor.
    pub async fn by_donor(&self, donor_id: RecordId) -> StoreResult<Vec<Record<Project>>> {
        self.get_all(&Filter::new().eq("donorId", donor_id)).await
    }

    pub async fn find_by_code(&self, project_code: &str) -> StoreResult<Option<Record<Project>>> {
        let wanted = project_code.trim();
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|p| p.project_code.eq_ignore_ascii_case(wanted)))
    }

    pub async fn statistics(&self) -> StoreResult<ProjectStatistics> {
        let projects = self.list().await?;
        let mut stats = ProjectStatistics {
            total: projects.len(),
            ..Default::default()
        };
        for project in &projects {
            *stats.by_status.entry(project.status).or_insert(0) += 1;
            stats.total_budget += project.total_budget;
        }
        Ok(stats)
    }

    /// Sum of project budgets per donor id.
    ///
    /// Donor ids are taken as stored; a deleted donor still gets a row.
    pub async fn budget_by_donor(&self) -> StoreResult<BTreeMap<RecordId, Amount>> {
        let mut totals = BTreeMap::new();
        for project in self.list().await? {
            *totals.entry(project.donor_id).or_insert(Amount::ZERO) += project.total_budget;
        }
        Ok(totals)
    }
}

impl Repository<Amendment> {
    pub async fn for_project(&self, project_id: RecordId) -> StoreResult<Vec<Record<Amendment>>> {
        self.get_all(&Filter::new().eq("projectId", project_id)).await
    }

    /// Next amendment number within a project: highest existing + 1, from 1.
    pub async fn get_next_amendment_number(&self, project_id: RecordId) -> StoreResult<u32> {
        let existing = self.for_project(project_id).await?;
        Ok(next_number(existing.iter().map(|a| a.amendment_number)))
    }

    /// Net budget change from a project's approved amendments.
    pub async fn approved_budget_change(&self, project_id: RecordId) -> StoreResult<Amount> {
        Ok(self
            .for_project(project_id)
            .await?
            .iter()
            .filter(|a| a.status == AmendmentStatus::Approved)
            .map(|a| a.budget_change)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, Store};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn store() -> Arc<dyn Store> {
        Arc::new(MemoryStore::new())
    }

    fn amendment(project: i64, number: u32, change: i64, status: AmendmentStatus) -> Amendment {
        Amendment {
            project_id: RecordId::new(project),
            amendment_number: number,
            amendment_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            description: format!("Amendment {}", number),
            budget_change: Amount::from(change),
            new_end_date: None,
            status,
        }
    }

    #[tokio::test]
    async fn test_statistics() {
        let repo: Repository<Project> = Repository::new(store());
        assert_eq!(repo.statistics().await.unwrap(), ProjectStatistics::default());

        let mut active = Project::new(RecordId::new(1), "UNI-01", Amount::from(1000));
        active.status = ProjectStatus::Active;
        repo.create(&active).await.unwrap();
        repo.create(&Project::new(RecordId::new(2), "WFP-01", Amount::from(500)))
            .await
            .unwrap();

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_budget, Amount::from(1500));
        assert_eq!(stats.by_status.get(&ProjectStatus::Active), Some(&1));
        assert_eq!(stats.by_status.get(&ProjectStatus::Planning), Some(&1));
    }

    #[tokio::test]
    async fn test_budget_by_donor_and_find_by_code() {
        let repo: Repository<Project> = Repository::new(store());
        repo.create(&Project::new(RecordId::new(1), "UNI-01", Amount::from(1000)))
            .await
            .unwrap();
        repo.create(&Project::new(RecordId::new(1), "UNI-02", Amount::from(250)))
            .await
            .unwrap();
        repo.create(&Project::new(RecordId::new(3), "ECHO-01", Amount::from(40)))
            .await
            .unwrap();

        let totals = repo.budget_by_donor().await.unwrap();
        assert_eq!(totals.get(&RecordId::new(1)), Some(&Amount::from(1250)));
        assert_eq!(totals.get(&RecordId::new(3)), Some(&Amount::from(40)));

        let found = repo.find_by_code(" uni-02 ").await.unwrap().unwrap();
        assert_eq!(found.total_budget, Amount::from(250));
        assert!(repo.find_by_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_next_amendment_number_is_scoped_max_plus_one() {
        let repo: Repository<Amendment> = Repository::new(store());
        assert_eq!(repo.get_next_amendment_number(RecordId::new(1)).await.unwrap(), 1);

        for number in [1, 3, 5] {
            repo.create(&amendment(1, number, 0, AmendmentStatus::Draft))
                .await
                .unwrap();
        }
        repo.create(&amendment(2, 9, 0, AmendmentStatus::Draft))
            .await
            .unwrap();

        assert_eq!(repo.get_next_amendment_number(RecordId::new(1)).await.unwrap(), 6);
        assert_eq!(repo.get_next_amendment_number(RecordId::new(2)).await.unwrap(), 10);
        assert_eq!(repo.get_next_amendment_number(RecordId::new(3)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_approved_budget_change() {
        let repo: Repository<Amendment> = Repository::new(store());
        repo.create(&amendment(1, 1, 200, AmendmentStatus::Approved))
            .await
            .unwrap();
        repo.create(&amendment(1, 2, -50, AmendmentStatus::Approved))
            .await
            .unwrap();
        repo.create(&amendment(1, 3, 999, AmendmentStatus::Draft))
            .await
            .unwrap();

        assert_eq!(
            repo.approved_budget_change(RecordId::new(1)).await.unwrap(),
            Amount::from(150)
        );
    }
}
