use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the SQLite file, create missing tables and keep the connection
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/pages.db");
    let conn = connect(db_file).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Open (and create if needed) a SQLite database file
pub async fn connect(db_file: &str) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::debug!("Connecting to {}", db_url);
    Ok(Database::connect(&db_url).await?)
}

/// Minimal schema bootstrap
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name='a001_page';".to_string(),
        ))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating new a001_page table");
        let create_page_table_sql = r#"
            CREATE TABLE a001_page (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                identifier TEXT NOT NULL UNIQUE,
                page_fields TEXT NOT NULL DEFAULT '[]',
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_page_table_sql.to_string(),
        ))
        .await?;
    } else {
        tracing::info!("Table a001_page already exists");
    }

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
