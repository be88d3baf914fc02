pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("MARKET_PG_DSN is not a valid Postgres DSN: {0}")]
	InvalidDsn(sqlx::Error),
	#[error("No admin database reachable from MARKET_PG_DSN: {0}")]
	AdminUnreachable(sqlx::Error),
	#[error("Statement failed on test database {database}: {source}")]
	Statement { database: String, source: sqlx::Error },
}
