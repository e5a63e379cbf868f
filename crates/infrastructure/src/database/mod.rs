use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// SQLite leaves foreign keys off unless asked, per connection. The review
/// and session cascades depend on them.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(format!("Failed to create SQLite pool: {}", e)))?;
        Ok(Database { pool })
    }

    /// A private in-memory database. Every SQLite connection to `:memory:`
    /// is its own database, so the pool holds exactly one connection forever.
    pub fn in_memory() -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(format!("Failed to create SQLite pool: {}", e)))?;
        Ok(Database { pool })
    }

    pub fn run_migrations(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DomainError::RepositoryError(format!("Migration failed: {}", e)))?;

        for version in applied {
            info!("Applied migration {}", version);
        }
        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Runs `query` inside `spawn_blocking`, checking the connection out on the
/// blocking thread as well.
pub(crate) async fn run_blocking<T, F>(pool: &SqlitePool, query: F) -> Result<T, DomainError>
where
    F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;
        query(&mut conn).map_err(map_diesel_error)
    })
    .await
    .map_err(|e| DomainError::RepositoryError(e.to_string()))?
}

pub(crate) fn map_diesel_error(err: diesel::result::Error) -> DomainError {
    use diesel::result::{DatabaseErrorKind, Error};

    match err {
        Error::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation => {
                DomainError::Conflict(info.message().to_string())
            }
            // Older SQLite builds only report the primary SQLITE_CONSTRAINT code
            _ if info.message().contains("constraint failed") => {
                DomainError::Conflict(info.message().to_string())
            }
            _ => DomainError::RepositoryError(info.message().to_string()),
        },
        Error::NotFound => DomainError::NotFound("Record not found".to_string()),
        other => DomainError::RepositoryError(other.to_string()),
    }
}
