//! Read-side joins for list screens.
//!
//! Both sides of a join are fetched concurrently, then references are
//! resolved in memory. A reference to a deleted record shows as "Unknown".

use super::Erp;
use crate::domain::{Contract, Filter, LabelIndex, Project, Record};
use crate::error::StoreResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWithDonor {
    pub project: Record<Project>,
    pub donor_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractWithParties {
    pub contract: Record<Contract>,
    pub project_code: String,
    pub employee_name: String,
}

impl Erp {
    /// Projects matching `filter`, each with its donor's name.
    pub async fn projects_with_donors(&self, filter: &Filter) -> StoreResult<Vec<ProjectWithDonor>> {
        let (projects_repo, donors_repo) = (self.projects(), self.donors());
        let (projects, donors) =
            futures::try_join!(projects_repo.get_all(filter), donors_repo.list())?;

        let donors = LabelIndex::from_records(&donors);
        Ok(projects
            .into_iter()
            .map(|project| {
                let donor_name = donors.resolve(Some(project.donor_id)).to_string();
                ProjectWithDonor {
                    project,
                    donor_name,
                }
            })
            .collect())
    }

    /// Contracts matching `filter`, each with its project code and employee name.
    pub async fn contracts_with_parties(
        &self,
        filter: &Filter,
    ) -> StoreResult<Vec<ContractWithParties>> {
        let (contracts_repo, projects_repo, employees_repo) =
            (self.contracts(), self.projects(), self.employees());
        let (contracts, projects, employees) = futures::try_join!(
            contracts_repo.get_all(filter),
            projects_repo.list(),
            employees_repo.list()
        )?;

        let projects = LabelIndex::from_records(&projects);
        let employees = LabelIndex::from_records(&employees);
        Ok(contracts
            .into_iter()
            .map(|contract| ContractWithParties {
                project_code: projects.resolve(contract.project_id).to_string(),
                employee_name: employees.resolve(contract.employee_id).to_string(),
                contract,
            })
            .collect())
    }
}
