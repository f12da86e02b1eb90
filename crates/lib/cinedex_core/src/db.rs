//! Local PostgreSQL lifecycle management.
//!
//! Spawns `initdb`, `pg_ctl`, and `pg_isready` to run a throwaway or
//! developer-local PostgreSQL instance. Production deployments point
//! `DATABASE_URL` at an externally managed server and never touch this;
//! integration tests use [`LocalDb::ephemeral`].

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::sleep;
use tracing::info;

/// Database name used by the application.
const DEFAULT_DATABASE: &str = "cinedex";

/// Maximum time to wait for PostgreSQL to become ready.
const PG_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval when waiting for PostgreSQL readiness.
const PG_READY_POLL: Duration = Duration::from_millis(200);

/// Errors from local database lifecycle operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("PostgreSQL command failed: {0}")]
    Command(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pg_config not found on PATH")]
    PgConfigNotFound,

    #[error("PostgreSQL not ready after {0:?}")]
    ReadyTimeout(Duration),
}

/// Result type for local database operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// A locally managed PostgreSQL instance.
pub struct LocalDb {
    bin_dir: PathBuf,
    data_dir: PathBuf,
    database: String,
    port: u16,
    started: bool,
    /// Keeps an ephemeral data directory alive until drop.
    _tempdir: Option<tempfile::TempDir>,
}

impl LocalDb {
    /// A persistent instance storing data under the platform data directory
    /// (e.g. `~/.local/share/cinedex/pgdata` on Linux). Binaries are
    /// discovered via `pg_config` on PATH.
    pub async fn with_default_data_dir() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cinedex")
            .join("pgdata");
        Ok(Self {
            bin_dir: discover_bin_dir().await?,
            data_dir,
            database: DEFAULT_DATABASE.to_string(),
            port: 0,
            started: false,
            _tempdir: None,
        })
    }

    /// An ephemeral instance for tests. Data lives in a tempdir and is
    /// removed when the `LocalDb` is dropped.
    pub async fn ephemeral() -> Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("pgdata");
        Ok(Self {
            bin_dir: discover_bin_dir().await?,
            data_dir,
            database: DEFAULT_DATABASE.to_string(),
            port: 0,
            started: false,
            _tempdir: Some(tempdir),
        })
    }

    /// Initialize the data directory if needed, start the server on a free
    /// port, and ensure the application database exists.
    pub async fn start(&mut self) -> Result<()> {
        if !self.data_dir.join("PG_VERSION").exists() {
            self.run_initdb().await?;
        }

        if self.port == 0 {
            self.port = find_free_port()?;
        }

        let pg_ctl = self.bin_dir.join("pg_ctl");
        let server_opts = format!(
            "-p {} -k {} -h localhost",
            self.port,
            self.data_dir.display()
        );
        let logfile = self.data_dir.join("postgresql.log");

        let output = Command::new(&pg_ctl)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-o")
            .arg(&server_opts)
            .arg("-l")
            .arg(&logfile)
            .arg("start")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl start failed: {stderr}")));
        }

        self.wait_for_ready().await?;
        self.started = true;
        self.create_database_if_missing().await?;

        info!(port = self.port, database = %self.database, "local PostgreSQL ready");
        Ok(())
    }

    /// Stop the server gracefully. No-op when not started.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }

        let pg_ctl = self.bin_dir.join("pg_ctl");
        let output = Command::new(&pg_ctl)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("-m")
            .arg("fast")
            .arg("stop")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("pg_ctl stop failed: {stderr}")));
        }

        self.started = false;
        info!("local PostgreSQL stopped");
        Ok(())
    }

    /// Connection URL for the application database.
    pub fn connection_url(&self) -> String {
        format!("postgresql://localhost:{}/{}", self.port, self.database)
    }

    /// Port the server listens on (0 until started).
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    async fn run_initdb(&self) -> Result<()> {
        let initdb = self.bin_dir.join("initdb");
        let output = Command::new(&initdb)
            .arg("-D")
            .arg(&self.data_dir)
            .arg("--no-locale")
            .arg("--encoding=UTF8")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DbError::Command(format!("initdb failed: {stderr}")));
        }
        Ok(())
    }

    /// Poll `pg_isready` until the server accepts connections.
    async fn wait_for_ready(&self) -> Result<()> {
        let pg_isready = self.bin_dir.join("pg_isready");
        let deadline = tokio::time::Instant::now() + PG_READY_TIMEOUT;

        loop {
            let output = Command::new(&pg_isready)
                .arg("-p")
                .arg(self.port.to_string())
                .arg("-h")
                .arg("localhost")
                .output()
                .await?;
            if output.status.success() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DbError::ReadyTimeout(PG_READY_TIMEOUT));
            }
            sleep(PG_READY_POLL).await;
        }
    }

    async fn create_database_if_missing(&self) -> Result<()> {
        // CREATE DATABASE has to run from the maintenance database.
        let maintenance_url = format!("postgresql://localhost:{}/postgres", self.port);
        let pool = sqlx::PgPool::connect(&maintenance_url).await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
                .bind(&self.database)
                .fetch_one(&pool)
                .await?;
        if !exists {
            // CREATE DATABASE cannot use bind parameters.
            let sql = format!("CREATE DATABASE \"{}\"", self.database);
            sqlx::query(&sql).execute(&pool).await?;
        }

        pool.close().await;
        Ok(())
    }
}

/// Locate PostgreSQL binaries via `pg_config --bindir`.
async fn discover_bin_dir() -> Result<PathBuf> {
    let output = Command::new("pg_config")
        .arg("--bindir")
        .output()
        .await
        .map_err(|_| DbError::PgConfigNotFound)?;
    if !output.status.success() {
        return Err(DbError::PgConfigNotFound);
    }
    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

/// Find a free ephemeral port by binding to port 0.
fn find_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
