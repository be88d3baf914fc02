mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

/// Reads, normalizes and validates a catalog config file.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.into(), source })?;
	let mut cfg = toml::from_str::<Config>(&raw)
		.map_err(|source| Error::ParseConfig { path: path.into(), source })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let catalog = &cfg.catalog;

	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::invalid("service.log_level", "must be non-empty."));
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::invalid("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::invalid("storage.postgres.pool_max_conns", "must be greater than zero."));
	}

	for (field, value) in [
		("catalog.max_page_size", catalog.max_page_size),
		("catalog.default_page_size", catalog.default_page_size),
		("catalog.description_max_chars", catalog.description_max_chars),
	] {
		if value == 0 {
			return Err(Error::invalid(field, "must be greater than zero."));
		}
	}

	if catalog.default_page_size > catalog.max_page_size {
		return Err(Error::invalid(
			"catalog.default_page_size",
			"must not exceed catalog.max_page_size.",
		));
	}

	let text_config = cfg.search.text_config.as_str();

	// Rendered into the schema trigger verbatim.
	if text_config.is_empty() || !text_config.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
		return Err(Error::invalid(
			"search.text_config",
			format!("must be a lowercase text search configuration name; got {text_config:?}."),
		));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.catalog.request_timeout_ms == Some(0) {
		cfg.catalog.request_timeout_ms = None;
	}

	cfg.search.text_config = cfg.search.text_config.trim().to_ascii_lowercase();
}
