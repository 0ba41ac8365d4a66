use erp_store::db::{init_db, MemoryStore, SqliteSettings, SqliteStore, Store};
use erp_store::domain::{resolve_label, Amount, Donor, Project, RecordId, UNKNOWN_LABEL};
use erp_store::{backup, export, Erp};
use std::sync::Arc;
use tempfile::TempDir;

async fn sqlite_store(dir: &TempDir, name: &str) -> Arc<dyn Store> {
    let path = dir.path().join(name).to_string_lossy().to_string();
    let pool = init_db(&path, SqliteSettings::default())
        .await
        .expect("init_db failed");
    Arc::new(SqliteStore::new(pool))
}

#[tokio::test]
async fn test_backup_restore_between_backends() {
    let dir = TempDir::new().unwrap();
    let source = Erp::new(sqlite_store(&dir, "source.db").await);

    let unicef = source.donors().create(&Donor::new("UNICEF", "UNI")).await.unwrap();
    let wfp = source.donors().create(&Donor::new("WFP", "WFP")).await.unwrap();
    source.donors().delete(unicef.id).await.unwrap();
    let project = source
        .projects()
        .create(&Project::new(wfp.id, "WFP-01", Amount::parse("2500.75").unwrap()))
        .await
        .unwrap();

    let snapshot = backup::take_snapshot(source.store().as_ref()).await.unwrap();
    let file = dir.path().join("erp.snap");
    std::fs::write(&file, backup::encode(&snapshot).unwrap()).unwrap();

    let bytes = std::fs::read(&file).unwrap();
    let decoded = backup::decode(&bytes).unwrap();

    let target = Erp::new(Arc::new(MemoryStore::new()));
    let summary = backup::restore(target.store().as_ref(), &decoded).await.unwrap();
    assert_eq!(summary.documents, 2);

    assert_eq!(target.donors().get_by_id(wfp.id).await.unwrap(), Some(wfp.clone()));
    assert_eq!(
        target.projects().get_by_id(project.id).await.unwrap(),
        Some(project)
    );
    assert!(target.donors().get_by_id(unicef.id).await.unwrap().is_none());

    let fresh = target.donors().create(&Donor::new("ECHO", "ECH")).await.unwrap();
    assert!(fresh.id > wfp.id);
}

#[tokio::test]
async fn test_restore_into_sqlite_advances_counter() {
    let dir = TempDir::new().unwrap();
    let source = Erp::new(Arc::new(MemoryStore::new()));
    for code in ["A", "B", "C"] {
        source.donors().create(&Donor::new(code, code)).await.unwrap();
    }

    let snapshot = backup::take_snapshot(source.store().as_ref()).await.unwrap();
    let target = Erp::new(sqlite_store(&dir, "target.db").await);
    backup::restore(target.store().as_ref(), &snapshot).await.unwrap();

    let next = target.donors().create(&Donor::new("D", "D")).await.unwrap();
    assert_eq!(next.id, RecordId::new(4));
}

#[tokio::test]
async fn test_restore_does_not_reissue_deleted_highest_id() {
    let dir = TempDir::new().unwrap();
    let source = Erp::new(Arc::new(MemoryStore::new()));
    source.donors().create(&Donor::new("UNICEF", "UNI")).await.unwrap();
    let wfp = source.donors().create(&Donor::new("WFP", "WFP")).await.unwrap();
    let project = source
        .projects()
        .create(&Project::new(wfp.id, "WFP-01", Amount::from(1000)))
        .await
        .unwrap();
    source.donors().delete(wfp.id).await.unwrap();

    let snapshot = backup::take_snapshot(source.store().as_ref()).await.unwrap();
    let decoded = backup::decode(&backup::encode(&snapshot).unwrap()).unwrap();

    let targets = [
        Erp::new(Arc::new(MemoryStore::new())),
        Erp::new(sqlite_store(&dir, "restored.db").await),
    ];
    for target in targets {
        backup::restore(target.store().as_ref(), &decoded).await.unwrap();

        let echo = target.donors().create(&Donor::new("ECHO", "ECH")).await.unwrap();
        assert_eq!(echo.id, RecordId::new(3));

        let donors = target.donors().list().await.unwrap();
        let restored = target.projects().get_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(resolve_label(&donors, Some(restored.donor_id)), UNKNOWN_LABEL);
    }
}

#[tokio::test]
async fn test_export_collection_csv() {
    let dir = TempDir::new().unwrap();
    let erp = Erp::new(sqlite_store(&dir, "export.db").await);
    let mut donor = Donor::new("Save the Children", "SCF");
    donor.country = Some("UK".to_string());
    erp.donors().create(&donor).await.unwrap();
    erp.donors().create(&Donor::new("WFP", "WFP")).await.unwrap();

    let csv = export::export_collection(erp.store().as_ref(), "donors")
        .await
        .unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,createdAt,updatedAt,code,country,name,status")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("1,"));
    assert!(first.ends_with(",SCF,UK,Save the Children,active"));
    let second = lines.next().unwrap();
    assert!(second.ends_with(",WFP,,WFP,active"));
    assert!(lines.next().is_none());

    let records = erp.donors().list().await.unwrap();
    assert_eq!(export::records_to_csv(&records).unwrap(), csv);

    let empty = export::export_collection(erp.store().as_ref(), "contracts")
        .await
        .unwrap();
    assert_eq!(empty, "id,createdAt,updatedAt\n");
}
