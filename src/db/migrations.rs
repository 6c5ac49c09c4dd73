//! Versioned, additive schema migrations.
//!
//! The applied version is mirrored to `PRAGMA user_version`. Steps only create
//! missing tables and add missing columns, so databases written before
//! versioning existed (user_version 0, partial `todos` table) upgrade in place.

use log::info;
use rusqlite::{Connection, Transaction};

use crate::db::{DbError, DbResult};

#[derive(Debug, Clone, Copy)]
enum Step {
    Sql(&'static str),
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    steps: &'static [Step],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        steps: &[
            Step::Sql(
                "CREATE TABLE IF NOT EXISTS todos (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    text TEXT NOT NULL,
                    done INTEGER NOT NULL DEFAULT 0,
                    category TEXT NOT NULL DEFAULT 'General'
                );
                CREATE TABLE IF NOT EXISTS deleted_categories (
                    name TEXT PRIMARY KEY
                );",
            ),
            Step::AddColumn {
                table: "todos",
                column: "category",
                definition: "TEXT NOT NULL DEFAULT 'General'",
            },
        ],
    },
    Migration {
        version: 2,
        steps: &[
            Step::AddColumn {
                table: "todos",
                column: "notes",
                definition: "TEXT NOT NULL DEFAULT ''",
            },
            Step::AddColumn {
                table: "todos",
                column: "created_at",
                definition: "INTEGER",
            },
            Step::AddColumn {
                table: "todos",
                column: "note_updated_at",
                definition: "INTEGER",
            },
            Step::Sql("CREATE INDEX IF NOT EXISTS idx_todos_category ON todos (category);"),
        ],
    },
];

/// Latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Apply every pending migration inside one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        for step in migration.steps {
            apply_step(&tx, step)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=db_migrate module=db status=ok version={}",
            migration.version
        );
    }
    tx.commit()?;
    Ok(())
}

fn apply_step(tx: &Transaction<'_>, step: &Step) -> DbResult<()> {
    match *step {
        Step::Sql(sql) => tx.execute_batch(sql)?,
        Step::AddColumn {
            table,
            column,
            definition,
        } => {
            if !has_column(tx, table, column)? {
                tx.execute_batch(&format!(
                    "ALTER TABLE {table} ADD COLUMN {column} {definition};"
                ))?;
            }
        }
    }
    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
