//! Repository contract, checked against both store backends.

use erp_store::db::{init_db, MemoryStore, SqliteSettings, SqliteStore, Store};
use erp_store::domain::{
    Amendment, AmendmentStatus, Amount, Contract, ContractStatus, Donor, DonorStatus, Employee,
    Filter, Project, RecordId,
};
use erp_store::{Repository, StoreError};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

struct Backend {
    name: &'static str,
    store: Arc<dyn Store>,
    _dir: Option<TempDir>,
}

async fn backends() -> Vec<Backend> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("erp.db").to_string_lossy().to_string();
    let pool = init_db(&path, SqliteSettings::default())
        .await
        .expect("init_db failed");

    vec![
        Backend {
            name: "memory",
            store: Arc::new(MemoryStore::new()),
            _dir: None,
        },
        Backend {
            name: "sqlite",
            store: Arc::new(SqliteStore::new(pool)),
            _dir: Some(dir),
        },
    ]
}

#[tokio::test]
async fn test_create_then_get_by_id_round_trips() {
    for backend in backends().await {
        let donors: Repository<Donor> = Repository::new(backend.store.clone());
        let mut donor = Donor::new("UNICEF", "UNI");
        donor.country = Some("Kenya".to_string());

        let created = donors.create(&donor).await.unwrap();
        assert!(created.id.as_i64() > 0, "{}", backend.name);
        assert_eq!(created.data, donor, "{}", backend.name);

        let fetched = donors.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_amounts_beyond_f64_precision_round_trip() {
    for backend in backends().await {
        let projects: Repository<Project> = Repository::new(backend.store.clone());
        let budget = Amount::parse("12345678901234.567").unwrap();
        let created = projects
            .create(&Project::new(RecordId::new(1), "BIG-01", budget))
            .await
            .unwrap();

        let fetched = projects.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_budget, budget, "{}", backend.name);
        assert_eq!(
            fetched.total_budget.to_canonical_string(),
            "12345678901234.567",
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_update_preserves_omitted_fields_and_advances_updated_at() {
    for backend in backends().await {
        let employees: Repository<Employee> = Repository::new(backend.store.clone());
        let mut employee = Employee::new("Amina", "Okafor");
        employee.department = "Finance".to_string();
        employee.email = Some("amina@example.org".to_string());
        let created = employees.create(&employee).await.unwrap();

        let updated = employees
            .update(created.id, &json!({"position": "Accountant"}))
            .await
            .unwrap();
        assert_eq!(updated.position, "Accountant", "{}", backend.name);
        assert_eq!(updated.department, "Finance", "{}", backend.name);
        assert_eq!(updated.email, employee.email, "{}", backend.name);
        assert_eq!(updated.created_at, created.created_at, "{}", backend.name);
        assert!(updated.updated_at >= created.updated_at, "{}", backend.name);

        let again = employees
            .update(created.id, &json!({"position": "Lead Accountant"}))
            .await
            .unwrap();
        assert!(again.updated_at >= updated.updated_at, "{}", backend.name);
        assert_eq!(
            employees.get_by_id(created.id).await.unwrap(),
            Some(again),
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_update_missing_id_is_not_found() {
    for backend in backends().await {
        let donors: Repository<Donor> = Repository::new(backend.store.clone());
        let err = donors
            .update(RecordId::new(12), &json!({"name": "Ghost"}))
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::NotFound { ref collection, id } if collection == "donors" && id == RecordId::new(12)),
            "{}: {:?}",
            backend.name,
            err
        );
    }
}

#[tokio::test]
async fn test_delete_is_idempotent_and_ids_are_not_reused() {
    for backend in backends().await {
        let donors: Repository<Donor> = Repository::new(backend.store.clone());
        let first = donors.create(&Donor::new("UNICEF", "UNI")).await.unwrap();
        let second = donors.create(&Donor::new("WFP", "WFP")).await.unwrap();

        donors.delete(second.id).await.unwrap();
        assert!(donors.get_by_id(second.id).await.unwrap().is_none());
        tokio_test::assert_ok!(donors.delete(second.id).await);

        let third = donors.create(&Donor::new("ECHO", "ECH")).await.unwrap();
        assert!(third.id > second.id, "{}", backend.name);
        assert!(second.id > first.id, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_get_all_on_empty_collection() {
    for backend in backends().await {
        let contracts: Repository<Contract> = Repository::new(backend.store.clone());
        let all = tokio_test::assert_ok!(contracts.get_all(&Filter::new()).await);
        assert!(all.is_empty(), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_filters_search_and_display_sort() {
    for backend in backends().await {
        let contracts: Repository<Contract> = Repository::new(backend.store.clone());
        for (number, title, month) in [
            ("CON-001", "Driver services", 1),
            ("CON-002", "Security guards", 3),
            ("CON-003", "Driver relief", 2),
        ] {
            contracts
                .create(&Contract {
                    contract_number: number.to_string(),
                    title: title.to_string(),
                    project_id: Some(RecordId::new(1)),
                    employee_id: None,
                    contract_type: None,
                    start_date: NaiveDate::from_ymd_opt(2026, month, 1).unwrap(),
                    end_date: None,
                    value: Amount::from(10),
                    status: ContractStatus::Active,
                })
                .await
                .unwrap();
        }

        // Newest start date first.
        let all = contracts.list().await.unwrap();
        let numbers: Vec<&str> = all.iter().map(|c| c.contract_number.as_str()).collect();
        assert_eq!(numbers, vec!["CON-002", "CON-003", "CON-001"], "{}", backend.name);

        let drivers = contracts
            .get_all(&Filter::new().search("DRIVER"))
            .await
            .unwrap();
        assert_eq!(drivers.len(), 2, "{}", backend.name);

        // Ids coming from form inputs as strings still match.
        let by_project = contracts
            .get_all(&Filter::new().eq("projectId", "1"))
            .await
            .unwrap();
        assert_eq!(by_project.len(), 3, "{}", backend.name);

        let blank_search = contracts.get_all(&Filter::new().search("  ")).await.unwrap();
        assert_eq!(blank_search.len(), 3, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_entities_without_display_sort_list_in_insertion_order() {
    for backend in backends().await {
        let donors: Repository<Donor> = Repository::new(backend.store.clone());
        for (name, code) in [("WFP", "WFP"), ("UNICEF", "UNI"), ("ECHO", "ECH")] {
            donors.create(&Donor::new(name, code)).await.unwrap();
        }
        let names: Vec<String> = donors
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.data.name)
            .collect();
        assert_eq!(names, vec!["WFP", "UNICEF", "ECHO"], "{}", backend.name);

        let employees: Repository<Employee> = Repository::new(backend.store.clone());
        for (first, last) in [("Li", "Wei"), ("Amina", "Okafor"), ("Jon", "Berg")] {
            employees.create(&Employee::new(first, last)).await.unwrap();
        }
        let names: Vec<String> = employees
            .list()
            .await
            .unwrap()
            .iter()
            .map(|e| e.full_name())
            .collect();
        assert_eq!(names, vec!["Li Wei", "Amina Okafor", "Jon Berg"], "{}", backend.name);
    }
}

#[tokio::test]
async fn test_sequence_numbers_take_max_plus_one() {
    for backend in backends().await {
        let amendments: Repository<Amendment> = Repository::new(backend.store.clone());
        let contracts: Repository<Contract> = Repository::new(backend.store.clone());
        let project = RecordId::new(4);

        for n in [1, 3, 5] {
            amendments
                .create(&Amendment {
                    project_id: project,
                    amendment_number: n,
                    amendment_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    description: String::new(),
                    budget_change: Amount::ZERO,
                    new_end_date: None,
                    status: AmendmentStatus::Draft,
                })
                .await
                .unwrap();
            contracts
                .create(&Contract {
                    contract_number: format!("CON-{:03}", n),
                    title: "Consultancy".to_string(),
                    project_id: None,
                    employee_id: None,
                    contract_type: None,
                    start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    end_date: None,
                    value: Amount::ZERO,
                    status: ContractStatus::Draft,
                })
                .await
                .unwrap();
        }

        assert_eq!(
            amendments.get_next_amendment_number(project).await.unwrap(),
            6,
            "{}",
            backend.name
        );
        assert_eq!(
            contracts.generate_contract_number().await.unwrap(),
            "CON-006",
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_refused_update_leaves_record_intact() {
    for backend in backends().await {
        let projects: Repository<Project> = Repository::new(backend.store.clone());
        let created = projects
            .create(&Project::new(RecordId::new(1), "UNI-01", Amount::from(1000)))
            .await
            .unwrap();

        let err = projects
            .update(created.id, &json!({"totalBudget": "a lot"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }), "{}", backend.name);
        assert_eq!(
            projects.get_by_id(created.id).await.unwrap(),
            Some(created),
            "{}",
            backend.name
        );
    }
}

#[tokio::test]
async fn test_status_filter_on_enum_field() {
    for backend in backends().await {
        let donors: Repository<Donor> = Repository::new(backend.store.clone());
        donors.create(&Donor::new("UNICEF", "UNI")).await.unwrap();
        let mut inactive = Donor::new("Old Fund", "OLD");
        inactive.status = DonorStatus::Inactive;
        donors.create(&inactive).await.unwrap();

        assert_eq!(donors.active().await.unwrap().len(), 1, "{}", backend.name);
        assert_eq!(
            donors
                .count(&Filter::new().eq("status", "inactive"))
                .await
                .unwrap(),
            1,
            "{}",
            backend.name
        );
    }
}
