// Integration tests for the migration framework

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = folio_store::migrations::apply_migrations(&mut conn);
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    for expected in ["schema_version", "documents", "sync_log"] {
        assert!(
            tables.contains(&expected.to_string()),
            "Missing table: {}",
            expected
        );
    }
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    folio_store::migrations::apply_migrations(&mut conn).unwrap();
    folio_store::migrations::apply_migrations(&mut conn).unwrap();

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 3, "Each migration is recorded once");
}

#[test]
fn test_checksums_recorded() {
    let mut conn = setup_test_db();
    folio_store::migrations::apply_migrations(&mut conn).unwrap();

    let checksums: Vec<String> = {
        let mut stmt = conn
            .prepare("SELECT checksum FROM schema_version ORDER BY id")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    };
    assert_eq!(checksums.len(), 3);
    assert!(checksums.iter().all(|c| c.len() == 64));
}

#[test]
fn test_drifted_checksum_is_rejected() {
    let mut conn = setup_test_db();
    folio_store::migrations::apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'tampered' WHERE migration_id = '001_documents'",
        [],
    )
    .unwrap();

    let err = folio_store::migrations::apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.op(), Some("migration_checksum"));
    assert!(err.message().contains("001_documents"));
}
