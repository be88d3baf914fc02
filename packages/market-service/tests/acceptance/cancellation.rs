use std::time::Duration;

use market_service::{Error, ListAgentsRequest, RequestScope, SubmitAgentRequest};

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn blocked_calls_are_cancelled_without_writing() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping blocked_calls_are_cancelled_without_writing; set MARKET_PG_DSN to run this test."
		);

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;
	let mut blocker = pool.begin().await.expect("Failed to open blocking transaction.");

	sqlx::query("LOCK TABLE agents IN ACCESS EXCLUSIVE MODE")
		.execute(&mut *blocker)
		.await
		.expect("Failed to lock agents.");

	let scope = RequestScope::new().with_timeout(Duration::from_millis(200));
	let err = service
		.list_agents(&scope, &ListAgentsRequest::default())
		.await
		.expect_err("Expected the read to time out.");

	assert!(matches!(err, Error::Cancelled { operation: "list_agents", timeout_ms: 200 }));

	let req = SubmitAgentRequest {
		graph: serde_json::json!({ "name": "never-lands" }),
		author: None,
		keywords: Vec::new(),
		categories: Vec::new(),
	};
	let err = service
		.submit_agent(&scope, &req, "alice")
		.await
		.expect_err("Expected the submission to time out.");

	assert!(matches!(err, Error::Cancelled { operation: "submit_agent", .. }));

	blocker.rollback().await.expect("Failed to release lock.");

	let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM agents WHERE name = $1")
		.bind("never-lands")
		.fetch_one(pool)
		.await
		.expect("Failed to count agents.");

	assert_eq!(count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
