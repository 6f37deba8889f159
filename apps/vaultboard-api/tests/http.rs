use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use vaultboard_api::{routes, state::AppState};
use vaultboard_config::Config;
use vaultboard_testkit::TestVault;

fn app(test_vault: &TestVault) -> Router {
	let mut config = Config::default();

	config.vault.path = test_vault.path().to_path_buf();

	routes::router(AppState::new(&config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.clone().oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let value = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Response body must be JSON.")
	};

	(status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
	let request = Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.");

	send(app, request).await
}

async fn post_json(app: &Router, uri: &str, payload: &str) -> (StatusCode, Value) {
	let request = Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.");

	send(app, request).await
}

#[tokio::test]
async fn health_ok() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);
	let (status, body) = get(&app, "/health").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn approval_round_trip_moves_file() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	test_vault
		.write_note("Pending_Approval", "REQ_1.md", &[("status", "pending")], "Pay the vendor.")
		.expect("Failed to write note.");

	let (status, body) = get(&app, "/api/approvals").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().map(Vec::len), Some(1));
	assert_eq!(body[0]["id"], "REQ_1");
	assert_eq!(body[0]["status"], "pending");
	assert_eq!(body[0]["requestedBy"], "Unknown");
	assert!(body[0]["expiresAt"].is_string());

	let (status, body) =
		post_json(&app, "/api/approvals", r#"{"id":"REQ_1","action":"approve"}"#).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({ "success": true, "message": "Item approved successfully", "action": "approve" })
	);
	assert!(test_vault.exists("Approved", "REQ_1.md"));

	let (status, body) = get(&app, "/api/approvals").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!([]));
}

#[tokio::test]
async fn invalid_action_is_bad_request() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	test_vault.write("Pending_Approval", "REQ_2.md", "Body").expect("Failed to write note.");

	let (status, body) =
		post_json(&app, "/api/approvals", r#"{"id":"REQ_2","action":"archive"}"#).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "Action must be either \"approve\" or \"reject\"");
	assert_eq!(body["error_code"], "invalid_request");
	assert!(test_vault.exists("Pending_Approval", "REQ_2.md"));
}

#[tokio::test]
async fn missing_fields_and_malformed_json_are_bad_requests() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);
	let (status, body) = post_json(&app, "/api/approvals", r#"{"id":"REQ_3"}"#).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "Missing id or action");

	let (status, body) = post_json(&app, "/api/approvals", "{not json").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);
	let (status, body) =
		post_json(&app, "/api/approvals", r#"{"id":"REQ_404","action":"reject"}"#).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"], "File REQ_404.md not found in Pending_Approval");
	assert!(test_vault.file_names("Rejected").expect("Listing must succeed.").is_empty());
}

#[tokio::test]
async fn occupied_destination_is_conflict() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	test_vault.write("Pending_Approval", "REQ_5.md", "new").expect("Failed to write note.");
	test_vault.write("Approved", "REQ_5.md", "old").expect("Failed to write note.");

	let (status, body) =
		post_json(&app, "/api/approvals", r#"{"id":"REQ_5","action":"approve"}"#).await;

	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["error_code"], "conflict");
	assert!(test_vault.exists("Pending_Approval", "REQ_5.md"));
}

#[tokio::test]
async fn first_stats_call_has_zero_trends() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	test_vault.write("Needs_Action", "a.md", "").expect("Failed to write note.");
	test_vault.write("Done", "b.md", "").expect("Failed to write note.");

	let (status, body) = get(&app, "/api/stats").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({
			"pending": 1,
			"inProgress": 0,
			"completed": 1,
			"total": 2,
			"trends": {
				"pendingChange": 0,
				"inProgressChange": 0,
				"completedChange": 0,
				"totalChange": 0,
			},
		})
	);
}

#[tokio::test]
async fn empty_vault_serves_empty_views() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	for uri in ["/api/approvals", "/api/emails", "/api/tasks"] {
		let (status, body) = get(&app, uri).await;

		assert_eq!(status, StatusCode::OK, "Unexpected status for {uri}.");
		assert_eq!(body, json!([]), "Unexpected body for {uri}.");
	}

	let (status, body) = get(&app, "/api/activity").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "activities": [] }));

	let (status, body) = get(&app, "/api/chart-data").await;
	let points = body.as_array().expect("Chart data must be an array.");

	assert_eq!(status, StatusCode::OK);
	assert_eq!(points.len(), 7);
	assert!(points.iter().all(|point| {
		point["pending"] == 0 && point["inProgress"] == 0 && point["completed"] == 0
	}));
}

#[tokio::test]
async fn emails_and_tasks_use_client_field_names() {
	let test_vault = TestVault::new().expect("Failed to create test vault.");
	let app = app(&test_vault);

	test_vault
		.write_note(
			"Needs_Action",
			"EMAIL_invoice.md",
			&[("from", "billing@example.com"), ("priority", "urgent")],
			"Invoice attached.",
		)
		.expect("Failed to write note.");

	let (_, emails) = get(&app, "/api/emails").await;

	assert_eq!(emails[0]["subject"], "invoice");
	assert_eq!(emails[0]["from"], "billing@example.com");
	assert_eq!(emails[0]["unread"], true);

	let (_, tasks) = get(&app, "/api/tasks").await;

	assert_eq!(tasks[0]["id"], "Needs_Action_EMAIL_invoice.md");
	assert_eq!(tasks[0]["status"], "inbox");
	assert!(tasks[0]["dueDate"].is_string());

	let (_, feed) = get(&app, "/api/activity").await;

	assert_eq!(feed["activities"][0]["type"], "email");
	assert_eq!(feed["activities"][0]["icon"], Value::Null);
}
