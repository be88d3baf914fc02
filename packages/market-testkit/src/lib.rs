//! Disposable Postgres databases for catalog integration tests.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, sync::Once, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DSN_VAR: &str = "MARKET_PG_DSN";

/// A database created beside `MARKET_PG_DSN`, removed by [`TestDatabase::cleanup`] or on drop.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let (admin, mut conn) = open_admin(&base).await?;
		let name = format!("market_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|source| Error::Statement { database: name.clone(), source })?;

		let _ = conn.close().await;
		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.dropped = true;

		drop_database(&self.admin, &self.name).await
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let admin = self.admin.clone();
		let name = std::mem::take(&mut self.name);
		// Drop may run on a test runtime thread, which must not block on another future.
		let outcome = thread::spawn(move || {
			let runtime =
				Builder::new_current_thread().enable_all().build().map_err(|err| err.to_string())?;

			runtime.block_on(drop_database(&admin, &name)).map_err(|err| err.to_string())
		})
		.join();

		if let Ok(Err(err)) = outcome {
			eprintln!("Failed to drop test database: {err}.");
		}
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_VAR).ok().filter(|dsn| !dsn.trim().is_empty())
}

/// Installs a test subscriber once per process. Honors `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
	static INIT: Once = Once::new();

	INIT.call_once(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
		let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
	});
}

async fn open_admin(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let primary = base.clone().database("postgres");

	if let Ok(conn) = PgConnection::connect_with(&primary).await {
		return Ok((primary, conn));
	}

	// Some managed servers hide `postgres`; `template1` always exists.
	let fallback = base.clone().database("template1");
	let conn = PgConnection::connect_with(&fallback).await.map_err(Error::AdminUnreachable)?;

	Ok((fallback, conn))
}

async fn drop_database(admin: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin).await.map_err(Error::AdminUnreachable)?;

	// FORCE also terminates pool connections the test left open.
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str())
		.await
		.map_err(|source| Error::Statement { database: name.to_string(), source })?;

	let _ = conn.close().await;

	Ok(())
}
