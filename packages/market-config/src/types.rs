use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub catalog: Catalog,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Catalog {
	pub default_page_size: u32,
	pub max_page_size: u32,
	/// Search results carry at most this many characters of the description.
	pub description_max_chars: u32,
	/// Applied to every call whose request scope does not set its own timeout.
	/// Zero disables the default.
	pub request_timeout_ms: Option<u64>,
}
impl Default for Catalog {
	fn default() -> Self {
		Self {
			default_page_size: 10,
			max_page_size: 100,
			description_max_chars: 500,
			request_timeout_ms: None,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Postgres text search configuration used both by the `agents.search` trigger and when
	/// tokenizing query text. Both sides must agree or prefix matches silently miss.
	pub text_config: String,
}
impl Default for Search {
	fn default() -> Self {
		Self { text_config: default_text_config() }
	}
}

fn default_text_config() -> String {
	"english".to_string()
}
