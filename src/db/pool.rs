//! Database connection pool

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Create a new SQLite connection pool
pub async fn create_pool(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(database_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let options = SqliteConnectOptions::from_str(database_path)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true);

    // In-memory databases exist per connection; keep the pool at one
    // connection so every query sees the same schema.
    let max_connections = if database_path.contains(":memory:") { 1 } else { 10 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

const SCHEMA_SQL: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Run database migrations. Every schema statement is IF NOT EXISTS, so
/// re-running against an existing database is a no-op.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in split_statements(SCHEMA_SQL) {
        sqlx::query(&stmt).execute(pool).await?;
    }
    Ok(())
}

/// Split a migration script into single statements for sqlx, which executes
/// one at a time. A `;` only terminates a statement at the top level:
/// partial indexes put one after a WHERE clause, column lists nest inside
/// parentheses, and defaults like datetime('now') carry quoted text.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;
    let mut quoted = false;

    for line in sql.lines() {
        let code = if quoted { line } else { strip_comment(line) };
        for c in code.chars() {
            match c {
                '\'' => {
                    quoted = !quoted;
                    current.push(c);
                }
                '(' if !quoted => {
                    depth += 1;
                    current.push(c);
                }
                ')' if !quoted => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ';' if !quoted && depth == 0 => {
                    let stmt = current.trim();
                    if !stmt.is_empty() {
                        statements.push(stmt.to_string());
                    }
                    current.clear();
                }
                _ => current.push(c),
            }
        }
        current.push('\n');
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

// Line comments only; the schema has no `--` inside string literals
fn strip_comment(line: &str) -> &str {
    match line.find("--") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Initialize database - create pool and run migrations
pub async fn init_database(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool(database_path).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
