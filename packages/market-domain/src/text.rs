use std::collections::HashSet;

/// Escape character paired with [`escape_like`] in `ILIKE ... ESCAPE` clauses.
pub const LIKE_ESCAPE: char = '\\';

/// Escapes `%`, `_` and the escape character itself so the input matches literally inside a
/// LIKE pattern.
pub fn escape_like(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for c in input.chars() {
		if matches!(c, '%' | '_' | LIKE_ESCAPE) {
			out.push(LIKE_ESCAPE);
		}

		out.push(c);
	}

	out
}

/// Wraps an escaped value for a case-insensitive substring match.
pub fn contains_pattern(input: &str) -> String {
	format!("%{}%", escape_like(input))
}

/// Returns the trimmed value, or `None` when nothing but whitespace was supplied.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

/// Trims each term, drops blanks, and removes repeats while keeping first-seen order.
pub fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for term in terms {
		let term = term.as_ref().trim();

		if term.is_empty() || !seen.insert(term.to_string()) {
			continue;
		}

		out.push(term.to_string());
	}

	out
}
