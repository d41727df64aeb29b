use gemdash_adapters::mysql::{MysqlProvider, MysqlQueryBackend};
use gemdash_core::config::ConnectionConfig;
use gemdash_core::connection::Session;
use gemdash_core::executor::QueryBackend;
use gemdash_core::value::{ParamValue, SqlValue};

fn mysql_integration_enabled() -> bool {
    matches!(
        std::env::var("GEMDASH_RUN_MYSQL_INTEGRATION").ok().as_deref(),
        Some("1")
    )
}

fn integration_config(database: &str) -> ConnectionConfig {
    let host =
        std::env::var("GEMDASH_TEST_DB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let user = std::env::var("GEMDASH_TEST_DB_USER").unwrap_or_else(|_| "root".to_string());
    let port = std::env::var("GEMDASH_TEST_DB_PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(3306);

    ConnectionConfig {
        host,
        port,
        database: database.to_string(),
        user,
    }
}

async fn execute_sql(backend: &MysqlQueryBackend, sql: &str) {
    backend
        .execute(sql, &[])
        .await
        .expect("statement should succeed");
}

#[tokio::test(flavor = "current_thread")]
async fn mysql_backend_session_query_and_mutation_paths() {
    if !mysql_integration_enabled() {
        return;
    }

    let database = "gemdash_adapters_cov";

    let admin_backend = MysqlQueryBackend::new(&integration_config("mysql"));
    execute_sql(
        &admin_backend,
        &format!("CREATE DATABASE IF NOT EXISTS `{database}`"),
    )
    .await;
    admin_backend
        .disconnect()
        .await
        .expect("admin disconnect should succeed");

    let config = integration_config(database);

    let mut session = Session::new(MysqlProvider::new(&config));
    session.open().await.expect("open should succeed");
    session.refresh().await.expect("refresh should succeed");
    session.close().await.expect("close should succeed");

    let backend = MysqlQueryBackend::new(&config);
    execute_sql(&backend, "DROP TABLE IF EXISTS integration_products").await;
    execute_sql(
        &backend,
        "CREATE TABLE integration_products (\
         ProductID BIGINT NOT NULL PRIMARY KEY,\
         Name VARCHAR(64) NOT NULL,\
         Price DECIMAL(10,2) NOT NULL,\
         Stock INT NULL\
         )",
    )
    .await;

    let affected = backend
        .execute(
            "INSERT INTO integration_products (ProductID, Name, Price, Stock) VALUES \
             (?, ?, ?, ?), (?, ?, ?, ?)",
            &[
                ParamValue::Int(1),
                ParamValue::Text("Gold Ring".to_string()),
                ParamValue::Float(25000.0),
                ParamValue::Int(5),
                ParamValue::Int(2),
                ParamValue::Text("Silver Chain".to_string()),
                ParamValue::Float(1200.5),
                ParamValue::Int(0),
            ],
        )
        .await
        .expect("insert should succeed");
    assert_eq!(affected, 2);

    let rows = backend
        .query(
            "SELECT ProductID, Name, Price, Stock FROM integration_products \
             WHERE Stock <= ? ORDER BY Stock ASC",
            &[ParamValue::Int(10)],
        )
        .await
        .expect("query should succeed");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].columns, ["ProductID", "Name", "Price", "Stock"]);
    assert_eq!(rows[0].values[0], SqlValue::Int(2));
    assert_eq!(
        rows[0].values[1],
        SqlValue::Text("Silver Chain".to_string())
    );
    // DECIMAL comes back over the text protocol as bytes.
    assert_eq!(rows[0].values[2], SqlValue::Text("1200.50".to_string()));
    assert_eq!(rows[1].values[3], SqlValue::Int(5));

    let empty = backend
        .query(
            "SELECT ProductID, Name, Price, Stock FROM integration_products WHERE Stock < ?",
            &[ParamValue::Int(0)],
        )
        .await
        .expect("empty query should succeed");
    assert!(empty.is_empty());

    execute_sql(&backend, "DROP TABLE IF EXISTS integration_products").await;
    backend
        .disconnect()
        .await
        .expect("backend disconnect should succeed");
}
