use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::{Error, Result, schema};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &market_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	/// Builds the pool without opening a connection; the first query connects.
	pub fn connect_lazy(cfg: &market_config::Postgres) -> Result<Self> {
		let pool = PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect_lazy(&cfg.dsn)?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self, text_config: &str) -> Result<()> {
		// The name is spliced into the trigger body, so only bare identifiers are accepted.
		if text_config.is_empty()
			|| !text_config.chars().all(|c| c.is_ascii_lowercase() || c == '_')
		{
			return Err(Error::InvalidArgument(format!(
				"text search configuration must be a lowercase identifier; got {text_config:?}."
			)));
		}

		let sql = schema::render_schema(text_config);
		let lock_id: i64 = 4_417_032;
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;
		// Function bodies contain `;`, so the script goes through the simple query protocol whole.
		sqlx::raw_sql(&sql).execute(&mut *tx).await?;

		tx.commit().await?;

		Ok(())
	}

	/// Opens a read-only REPEATABLE READ transaction so every statement in it sees one snapshot.
	pub async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
			.execute(&mut *tx)
			.await?;

		Ok(tx)
	}
}
