//! Provisioning against a live MySQL server. Run with
//! `TEST_MYSQL_HOST=127.0.0.1 cargo test -- --ignored`.

use sql_gateway::{ensure_patient_table, provision, DatabaseSettings, MySqlBackend, NewPatient, SqlBackend};

fn live_settings() -> Option<DatabaseSettings> {
    let host = std::env::var("TEST_MYSQL_HOST").ok()?;
    Some(DatabaseSettings {
        host,
        port: std::env::var("TEST_MYSQL_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3306),
        user: std::env::var("TEST_MYSQL_USER").unwrap_or_else(|_| "root".into()),
        password: std::env::var("TEST_MYSQL_PASSWORD").unwrap_or_default(),
        name: std::env::var("TEST_MYSQL_DATABASE").unwrap_or_else(|_| "sql_gateway_test".into()),
        max_connections: 2,
    })
}

#[tokio::test]
#[ignore = "needs a MySQL server (TEST_MYSQL_HOST)"]
async fn provisioning_twice_is_a_no_op() {
    let Some(settings) = live_settings() else {
        return;
    };
    let pool = provision(&settings).await.expect("first provisioning");
    ensure_patient_table(&pool).await.expect("table creation is idempotent");
    pool.close().await;

    let pool = provision(&settings).await.expect("second provisioning");
    let backend = MySqlBackend::new(pool);
    let id = backend
        .insert_patient(&NewPatient {
            name: "Provision".into(),
            date_of_birth: sql_gateway::patient::parse_date_of_birth("2000-01-01").unwrap(),
        })
        .await
        .unwrap();
    assert!(id > 0);

    let rows = backend
        .fetch_rows(&format!("SELECT name FROM patient WHERE patientid = {}", id))
        .await
        .unwrap();
    assert_eq!(rows[0]["name"], "Provision");

    let outcome = backend
        .execute("INSERT INTO patient (name, dateOfBirth) VALUES ('Raw', '2001-02-03')")
        .await
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);
    assert!(outcome.insert_id.unwrap() > id);

    let patients = backend.list_patients().await.unwrap();
    assert!(patients.windows(2).all(|w| w[0].id < w[1].id));
}
