use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read catalog config {path:?}: {source}")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Cannot parse catalog config {path:?}: {source}")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	/// `field` is the dotted TOML path of the offending key.
	#[error("{field} {reason}")]
	Validation { field: &'static str, reason: String },
}
impl Error {
	pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Validation { field, reason: reason.into() }
	}
}
