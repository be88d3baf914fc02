use serde_json::json;

use market_domain::SubmissionStatus;
use market_service::{Error, ListAgentsRequest, RequestScope, SubmitAgentRequest};

fn request(name: &str) -> SubmitAgentRequest {
	SubmitAgentRequest {
		graph: json!({ "name": name, "description": "Builds nightly reports.", "nodes": [] }),
		author: None,
		keywords: vec!["reports".to_string(), " reports ".to_string()],
		categories: vec!["analytics".to_string()],
	}
}

async fn count_named(pool: &sqlx::PgPool, name: &str) -> i64 {
	sqlx::query_scalar::<_, i64>("SELECT count(*) FROM agents WHERE name = $1")
		.bind(name)
		.fetch_one(pool)
		.await
		.expect("Failed to count agents.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn submitted_agent_is_a_pending_first_version() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping submitted_agent_is_a_pending_first_version; set MARKET_PG_DSN to run this test."
		);

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let scope = RequestScope::new();
	let submitted = service
		.submit_agent(&scope, &request("Report Writer"), "alice")
		.await
		.expect("Failed to submit agent.");
	let details = service
		.get_agent_details(&scope, submitted.agent.id, None)
		.await
		.expect("Failed to read submitted agent.");

	assert_eq!(details.version, 1);
	assert_eq!(details.submission_status, SubmissionStatus::Pending);
	assert_eq!(details.created_at, details.updated_at);
	assert_eq!(details.created_at, details.submission_date);
	assert_eq!(details.created_at, submitted.created_at);
	assert_eq!(details.agent.author, "alice");
	assert_eq!(details.agent.keywords, vec!["reports".to_string()]);
	assert_eq!(details.agent.description, "Builds nightly reports.");

	let listed = service
		.list_agents(&scope, &ListAgentsRequest::default())
		.await
		.expect("Failed to list agents.");

	assert!(listed.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn failure_before_commit_leaves_no_row() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping failure_before_commit_leaves_no_row; set MARKET_PG_DSN to run this test.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;

	// The insert itself succeeds; the deferred check raises only when the transaction commits.
	sqlx::raw_sql(
		"\
CREATE FUNCTION reject_marked_agents() RETURNS trigger AS $$
BEGIN
	IF NEW.name = 'fail-on-commit' THEN
		RAISE EXCEPTION 'rejected at commit';
	END IF;

	RETURN NEW;
END
$$ LANGUAGE plpgsql;

CREATE CONSTRAINT TRIGGER agents_reject_marked
	AFTER INSERT ON agents
	DEFERRABLE INITIALLY DEFERRED
	FOR EACH ROW EXECUTE FUNCTION reject_marked_agents();",
	)
	.execute(pool)
	.await
	.expect("Failed to install deferred trigger.");

	let err = service
		.submit_agent(&RequestScope::new(), &request("fail-on-commit"), "alice")
		.await
		.expect_err("Expected the commit to fail.");

	assert!(matches!(err, Error::TransactionFailure { operation: "submit_agent", .. }));
	assert_eq!(count_named(pool, "fail-on-commit").await, 0);

	service
		.submit_agent(&RequestScope::new(), &request("commits fine"), "alice")
		.await
		.expect("Unmarked submissions should still commit.");

	assert_eq!(count_named(pool, "commits fine").await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MARKET_PG_DSN to run."]
async fn failed_insert_is_rolled_back() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping failed_insert_is_rolled_back; set MARKET_PG_DSN to run this test.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let pool = &service.db.pool;

	sqlx::query("ALTER TABLE agents ADD CONSTRAINT agents_name_not_banned CHECK (name <> 'banned')")
		.execute(pool)
		.await
		.expect("Failed to add check constraint.");

	let err = service
		.submit_agent(&RequestScope::new(), &request("banned"), "alice")
		.await
		.expect_err("Expected the insert to fail.");

	assert!(matches!(err, Error::TransactionFailure { .. }));
	assert_eq!(count_named(pool, "banned").await, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
