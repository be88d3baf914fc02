use time::macros::datetime;

use market_domain::{SortBy, SortOrder, SubmissionStatus};
use market_service::{PageRequest, RequestScope, SearchRequest};

use super::Seed;

fn request(query: &str) -> SearchRequest {
	SearchRequest { query: query.to_string(), ..Default::default() }
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn every_query_term_must_prefix_match() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping every_query_term_must_prefix_match; set MARKET_PG_DSN to run this test.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;

	super::seed_agent(pool, Seed::approved("Fooling Barista", datetime!(2025-01-01 0:00 UTC)))
		.await;
	super::seed_agent(pool, Seed::approved("Foo Only", datetime!(2025-01-02 0:00 UTC))).await;
	super::seed_agent(
		pool,
		Seed {
			description: "Draws a bar chart.",
			..Seed::approved("Charts", datetime!(2025-01-03 0:00 UTC))
		},
	)
	.await;
	super::seed_agent(
		pool,
		Seed {
			status: SubmissionStatus::Pending,
			..Seed::approved("Foo Bar Pending", datetime!(2025-01-04 0:00 UTC))
		},
	)
	.await;

	let results = service
		.search(&RequestScope::new(), &request("foo bar"))
		.await
		.expect("Failed to search.");

	assert_eq!(super::names(&results, |item| &item.agent.agent.name), vec!["Fooling Barista"]);
	assert!(results[0].rank > 0.0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn categories_filter_by_intersection() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping categories_filter_by_intersection; set MARKET_PG_DSN to run this test.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;

	super::seed_agent(
		pool,
		Seed { categories: &["data"], ..Seed::approved("Loader", datetime!(2025-01-01 0:00 UTC)) },
	)
	.await;
	super::seed_agent(
		pool,
		Seed { categories: &["ops"], ..Seed::approved("Pager", datetime!(2025-01-02 0:00 UTC)) },
	)
	.await;
	super::seed_agent(
		pool,
		Seed {
			categories: &["ml", "data"],
			..Seed::approved("Trainer", datetime!(2025-01-03 0:00 UTC))
		},
	)
	.await;

	let scope = RequestScope::new();
	let filtered = SearchRequest {
		categories: vec!["data".to_string(), "ml".to_string(), " ".to_string()],
		sort_by: SortBy::CreatedAt,
		sort_order: SortOrder::Ascending,
		..Default::default()
	};
	let results = service.search(&scope, &filtered).await.expect("Failed to search by category.");

	assert_eq!(super::names(&results, |item| &item.agent.agent.name), vec!["Loader", "Trainer"]);
	assert!(results.iter().all(|item| item.rank == 0.0));

	let results = service.search(&scope, &request("  ")).await.expect("Failed to search all.");

	assert_eq!(results.len(), 3);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn name_sort_orders_matches_ascending() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping name_sort_orders_matches_ascending; set MARKET_PG_DSN to run this test.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;

	for (name, day) in [
		("Zeta data pipeline", 1),
		("Alpha data pipeline builder", 2),
		("Mid pipeline for data", 3),
		("Unrelated helper", 4),
	] {
		let created_at = datetime!(2025-01-01 0:00 UTC) + time::Duration::days(day);

		super::seed_agent(pool, Seed::approved(name, created_at)).await;
	}

	let req = SearchRequest {
		query: "data pipeline".to_string(),
		sort_by: SortBy::parse(Some("name")),
		sort_order: SortOrder::parse(Some("ascending")),
		paging: PageRequest::new(1, 10),
		..Default::default()
	};
	let results = service.search(&RequestScope::new(), &req).await.expect("Failed to search.");

	assert_eq!(
		super::names(&results, |item| &item.agent.agent.name),
		vec!["Alpha data pipeline builder", "Mid pipeline for data", "Zeta data pipeline"]
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn stop_words_match_nothing_and_descriptions_are_truncated() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping stop_words_match_nothing_and_descriptions_are_truncated; set MARKET_PG_DSN to run this test."
		);

		return;
	};
	let mut cfg = super::test_config(test_db.dsn().to_string());

	cfg.catalog.description_max_chars = 12;

	let service = super::build_service(cfg).await;

	super::seed_agent(
		&service.db.pool,
		Seed {
			description: "Summarizes the longest reports you can find.",
			keywords: &["summary"],
			..Seed::approved("The Reporter", datetime!(2025-01-01 0:00 UTC))
		},
	)
	.await;

	let scope = RequestScope::new();
	let results = service.search(&scope, &request("the and of")).await.expect("Failed to search.");

	assert!(results.is_empty());

	let results = service.search(&scope, &request("summ")).await.expect("Failed to search.");

	assert_eq!(results.len(), 1);
	assert_eq!(results[0].agent.agent.description, "Summarizes t");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
