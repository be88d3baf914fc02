//! Predicate composition for catalog queries.
//!
//! Every caller-supplied value reaches the store through `push_bind`; the SQL text produced here
//! only ever contains fixed fragments and `$n` placeholders. Queries alias `agents` as `a`, the
//! featured join as `fa`, and the search query CTE as `query`.

use sqlx::{Postgres, QueryBuilder};

use market_domain::{SubmissionStatus, text};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate<'a> {
	Status(SubmissionStatus),
	/// Case-insensitive substring match on the name. LIKE wildcards in the value match literally.
	NameContains(&'a str),
	HasKeyword(&'a str),
	HasCategory(&'a str),
	/// The entry's categories intersect the supplied set.
	AnyCategory(&'a [String]),
	/// An active `featured_agent` row lists the category.
	FeaturedIn(&'a str),
	/// The search vector satisfies the composed `query.q` tsquery.
	MatchesQuery,
}
impl<'a> Predicate<'a> {
	pub fn push(&self, builder: &mut QueryBuilder<'a, Postgres>) {
		match *self {
			Self::Status(status) => {
				builder.push("a.submission_status = ").push_bind(status.as_str());
			},
			Self::NameContains(name) => {
				builder
					.push("a.name ILIKE ")
					.push_bind(text::contains_pattern(name))
					.push(" ESCAPE '\\'");
			},
			Self::HasKeyword(keyword) => {
				builder.push_bind(keyword).push(" = ANY(a.keywords)");
			},
			Self::HasCategory(category) => {
				builder.push_bind(category).push(" = ANY(a.categories)");
			},
			Self::AnyCategory([]) => {
				builder.push("TRUE");
			},
			Self::AnyCategory(categories) => {
				builder.push("a.categories && ").push_bind(categories.to_vec()).push("::text[]");
			},
			Self::FeaturedIn(category) => {
				builder
					.push("fa.is_active AND ")
					.push_bind(category)
					.push(" = ANY(fa.featured_categories)");
			},
			Self::MatchesQuery => {
				builder.push("a.search @@ query.q");
			},
		}
	}
}

/// Appends `WHERE p1 AND p2 ...`; nothing when the list is empty.
pub fn push_where<'a>(builder: &mut QueryBuilder<'a, Postgres>, predicates: &[Predicate<'a>]) {
	for (idx, predicate) in predicates.iter().enumerate() {
		builder.push(if idx == 0 { " WHERE " } else { " AND " });

		predicate.push(builder);
	}
}

/// Optional single-value filters accepted by catalog listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter<'a> {
	pub name: Option<&'a str>,
	pub keyword: Option<&'a str>,
	pub category: Option<&'a str>,
}
impl<'a> ListFilter<'a> {
	/// Visible entries only, plus one predicate per non-blank filter.
	pub fn predicates(&self) -> Vec<Predicate<'a>> {
		let mut predicates = vec![Predicate::Status(SubmissionStatus::Approved)];

		if let Some(name) = text::non_blank(self.name) {
			predicates.push(Predicate::NameContains(name));
		}
		if let Some(keyword) = text::non_blank(self.keyword) {
			predicates.push(Predicate::HasKeyword(keyword));
		}
		if let Some(category) = text::non_blank(self.category) {
			predicates.push(Predicate::HasCategory(category));
		}

		predicates
	}
}
