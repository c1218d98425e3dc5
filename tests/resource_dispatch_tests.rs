//! Integration tests for resource operations.
//!
//! These tests drive operations end to end through a recording transport
//! and check the request that was sent and the outcome that came back.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{client, DelayedTransport, FailingTransport, HangingTransport, RecordingTransport};
use serde_json::{json, Value};
use workamajig_api::clients::HttpMethod;
use workamajig_api::rest::{
    json_data_processor, MethodSpec, Params, Resource, ResourceDescriptor, ResourceOperation,
};
use workamajig_api::{ApiHost, ApiVersion, ErrorKind, Protocol, WorkamajigError};

fn params(value: Value) -> Option<Params> {
    value.as_object().cloned()
}

// ============================================================================
// Request construction
// ============================================================================

#[tokio::test]
async fn test_list_contacts_sends_get_with_token_headers() {
    let transport = RecordingTransport::respond(200, r#"{"data":[]}"#);
    let client = client(transport.clone());

    let list = client.contacts().operation("list").unwrap();
    let response = list.call(&[], None).await.unwrap();

    assert_eq!(response["data"], json!([]));
    assert_eq!(transport.call_count(), 1);

    let request = transport.last_request();
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.path, "/api/beta1/contacts");
    assert!(request.path.ends_with("/contacts"));
    assert_eq!(request.header("APIAccessToken"), Some("AT"));
    assert_eq!(request.header("UserToken"), Some("UT"));
    assert_eq!(request.header("Accept"), Some("application/json"));
    assert_eq!(request.header("Workamajig-Version"), Some("beta1"));
    assert!(request.header("Content-Type").is_none());
    assert!(request.header("Authorization").is_none());
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_default_headers_describe_the_client() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    client.timesheets().operation("list").unwrap().call(&[], None).await.unwrap();

    let request = transport.last_request();
    let user_agent = request.header("User-Agent").unwrap();
    assert!(user_agent.starts_with("Workamajig/v1 RustBindings/"));

    let client_user_agent: Value =
        serde_json::from_str(request.header("X-Workamajig-Client-User-Agent").unwrap()).unwrap();
    assert_eq!(client_user_agent["lang"], "rust");
    assert_eq!(client_user_agent["publisher"], "workamajig");
}

#[tokio::test]
async fn test_get_params_travel_in_query_string() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    let list = client.projects().operation("list").unwrap();
    list.call(&[], params(json!({"projectKey": "ACME 01", "status": null})))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.path, "/api/beta1/projects?projectKey=ACME%2001");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_project_create_sends_json_body() {
    let transport = RecordingTransport::respond(200, r#"{"id":7}"#);
    let client = client(transport.clone());

    let create = client.projects().operation("create").unwrap();
    let created = create
        .call(&[], params(json!({"projectName": "Launch", "budget": 1200})))
        .await
        .unwrap();

    assert_eq!(created["id"], 7);

    let request = transport.last_request();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.path, "/api/beta1/projects");
    assert_eq!(request.header("Content-Type"), Some("application/json"));

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"projectName": "Launch", "budget": 1200}));
}

#[tokio::test]
async fn test_config_changes_apply_to_existing_resources() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let contacts = client.contacts();

    client
        .set_host(
            ApiHost::new("tenant.example.com").unwrap(),
            Some(8080),
            Some(Protocol::Http),
        )
        .unwrap();
    client.set_api_version(ApiVersion::Latest);

    contacts.operation("list").unwrap().call(&[], None).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.url(), "http://tenant.example.com:8080/api/latest/contacts");
    assert_eq!(request.header("Workamajig-Version"), Some("latest"));
}

#[tokio::test]
async fn test_override_host_wins_over_config_host() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    let contacts = client
        .contacts()
        .with_override_host(ApiHost::new("files.workamajig.com").unwrap());
    contacts.operation("list").unwrap().call(&[], None).await.unwrap();

    assert_eq!(transport.last_request().host.as_ref(), "files.workamajig.com");
}

#[tokio::test]
async fn test_no_version_header_without_version() {
    let transport = RecordingTransport::respond(200, "{}");
    let config = workamajig_api::WorkamajigConfig::builder()
        .without_api_version()
        .build()
        .unwrap();
    let client = workamajig_api::Workamajig::with_transport(config, transport.clone());

    client.contacts().operation("list").unwrap().call(&[], None).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.path, "/api/contacts");
    assert!(request.header("Workamajig-Version").is_none());
}

// ============================================================================
// Validation before dispatch
// ============================================================================

#[tokio::test]
async fn test_missing_required_param_fails_without_transport_call() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    let list = client.projects().operation("list").unwrap();
    let error = list.call(&[], params(json!({}))).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.param.as_deref()),
        Some("projectKey")
    );
    assert_eq!(transport.call_count(), 0);

    let error = list.call(&[], None).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_nested_form_param_fails_without_transport_call() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    let list = client.contacts().operation("list").unwrap();
    let error = list
        .call(&[], params(json!({"filter": {"name": "x"}})))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    assert_eq!(transport.call_count(), 0);
}

// ============================================================================
// Response classification
// ============================================================================

#[tokio::test]
async fn test_multi_status_yields_ordered_sub_errors() {
    let transport = RecordingTransport::respond(
        207,
        r#"{"errors":[{"type":"invalid_request_error","message":"bad row"},{"type":"api_error"}]}"#,
    );
    let client = client(transport.clone());

    let error = client
        .contacts()
        .operation("list")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MultiStatus);
    let items = error.item_errors();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind(), ErrorKind::InvalidRequest);
    assert_eq!(items[0].message(), "bad row");
    assert_eq!(items[1].kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_unparsable_body_is_api_error_with_raw_body() {
    let transport = RecordingTransport::respond(200, "Service Unavailable");
    let client = client(transport.clone());

    let error = client
        .timesheets()
        .operation("list")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Api);
    assert_eq!(error.request_id(), Some("req_test"));
    assert!(matches!(
        &error,
        WorkamajigError::Api { raw_body: Some(body), .. } if body == "Service Unavailable"
    ));
}

#[tokio::test]
async fn test_rate_limit_status_wins_over_type_tag() {
    let transport = RecordingTransport::respond(
        429,
        r#"{"error":{"type":"invalid_request_error","message":"Too many requests"}}"#,
    );
    let client = client(transport.clone());

    let error = client
        .contacts()
        .operation("list")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RateLimit);
    assert_eq!(error.status_code(), Some(429));
    assert_eq!(error.request_id(), Some("req_test"));
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let transport = RecordingTransport::respond(401, r#"{"error":"Invalid UserToken"}"#);
    let client = client(transport.clone());

    let error = client
        .contacts()
        .operation("list")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Authentication);
    assert_eq!(error.message(), "Invalid UserToken");
}

// ============================================================================
// Transport failures and timeouts
// ============================================================================

#[tokio::test]
async fn test_transport_failure_is_connection_error() {
    let client = client(Arc::new(FailingTransport));

    let error = client
        .contacts()
        .operation("list")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert!(error.is_connection());
    assert_eq!(
        error.to_string(),
        "An error occurred with our connection to Workamajig"
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeout_aborts_once_and_reports_once() {
    let transport = Arc::new(HangingTransport::default());
    let client = client(transport.clone());
    client.set_timeout(Some(Duration::from_millis(50)));

    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = tokio::sync::oneshot::channel();

    let list = client.contacts().operation("list").unwrap();
    let handle = list.call_with_callback(&[], None, {
        let calls = Arc::clone(&calls);
        move |result| {
            calls.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(result);
        }
    });

    let result = rx.await.unwrap();
    handle.await.unwrap();

    // Nothing else can arrive later.
    tokio::time::advance(Duration::from_secs(10)).await;

    let error = result.unwrap_err();
    assert!(error.is_connection());
    assert_eq!(
        error.to_string(),
        "Request aborted due to timeout being reached (50ms)"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(transport.started(), 1);
    assert_eq!(transport.aborted(), 1);
}

async fn assert_late_outcome_is_suppressed(transport: Arc<DelayedTransport>) {
    let client = client(transport.clone());
    client.set_timeout(Some(Duration::from_millis(50)));

    let calls = Arc::new(AtomicUsize::new(0));
    let outcomes = Arc::new(std::sync::Mutex::new(Vec::new()));

    let list = client.contacts().operation("list").unwrap();
    let handle = list.call_with_callback(&[], None, {
        let calls = Arc::clone(&calls);
        let outcomes = Arc::clone(&outcomes);
        move |result| {
            calls.fetch_add(1, Ordering::SeqCst);
            outcomes.lock().unwrap().push(result);
        }
    });
    handle.await.unwrap();

    // Run well past the moment the transport would have answered.
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(transport.started(), 1);
    assert_eq!(transport.aborted(), 1);
    assert_eq!(transport.delivered(), 0);

    let mut outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 1);
    let error = outcomes.pop().unwrap().unwrap_err();
    assert!(error.is_connection());
    assert_eq!(
        error.to_string(),
        "Request aborted due to timeout being reached (50ms)"
    );
}

#[tokio::test(start_paused = true)]
async fn test_response_after_timeout_is_never_delivered() {
    let transport =
        DelayedTransport::respond_after(Duration::from_millis(200), 200, r#"{"data":[]}"#);
    assert_late_outcome_is_suppressed(transport).await;
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_after_timeout_is_never_delivered() {
    let transport = DelayedTransport::fail_after(Duration::from_millis(200), "connection reset");
    assert_late_outcome_is_suppressed(transport).await;
}

#[tokio::test]
async fn test_callback_runs_after_call_returns() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());

    let delivered = Arc::new(AtomicUsize::new(0));
    let list = client.contacts().operation("list").unwrap();
    let handle = list.call_with_callback(&[], None, {
        let delivered = Arc::clone(&delivered);
        move |result| {
            assert!(result.is_ok());
            delivered.fetch_add(1, Ordering::SeqCst);
        }
    });

    // The current-thread test runtime has not polled the spawned task yet.
    assert_eq!(delivered.load(Ordering::SeqCst), 0);

    handle.await.unwrap();
    assert_eq!(delivered.load(Ordering::SeqCst), 1);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let list = client.projects().operation("list").unwrap();

    let (a, b) = tokio::join!(
        list.call(&[], params(json!({"projectKey": "A"}))),
        list.call(&[], params(json!({"projectKey": "B"}))),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());

    let mut paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/api/beta1/projects?projectKey=A".to_string(),
            "/api/beta1/projects?projectKey=B".to_string(),
        ]
    );
}

// ============================================================================
// Caller-declared resources
// ============================================================================

static WIDGETS: ResourceDescriptor = ResourceDescriptor::new("widgets", "widgets").basic(&[
    ResourceOperation::Retrieve,
    ResourceOperation::Update,
    ResourceOperation::Delete,
]);

const CREATE_BOARD: MethodSpec = MethodSpec::new(HttpMethod::Post).required(&["projectName"]);

static BOARDS: ResourceDescriptor =
    ResourceDescriptor::new("boards", "boards").custom(&[("create", CREATE_BOARD)]);

static JSON_WIDGETS: ResourceDescriptor = ResourceDescriptor::new("widgets", "widgets")
    .basic(&[ResourceOperation::Update])
    .request_data_processor(json_data_processor);

#[tokio::test]
async fn test_url_params_are_escaped_into_path() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &WIDGETS);

    let retrieve = widgets.operation("retrieve").unwrap();
    retrieve.call(&["a/b c"], None).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.path, "/api/beta1/widgets/a%2Fb%20c");
    assert!(!request.path.contains('{'));

    let delete = widgets.operation("del").unwrap();
    delete.call(&["42"], None).await.unwrap();
    let request = transport.last_request();
    assert_eq!(request.http_method, HttpMethod::Delete);
    assert_eq!(request.path, "/api/beta1/widgets/42");
}

#[tokio::test]
async fn test_missing_url_value_fails_without_transport_call() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &WIDGETS);

    let error = widgets
        .operation("retrieve")
        .unwrap()
        .call(&[], None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::MissingUrlParameter);
    assert!(matches!(
        &error,
        WorkamajigError::MissingUrlParameter { name } if name == "id"
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_empty_url_value_fails_without_transport_call() {
    let transport = RecordingTransport::respond(200, r#"{"data":"collection"}"#);
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &WIDGETS);

    let error = widgets
        .operation("retrieve")
        .unwrap()
        .call(&[""], None)
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        WorkamajigError::MissingUrlParameter { name } if name == "id"
    ));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_dot_segment_url_values_cannot_leave_the_resource() {
    let transport = RecordingTransport::respond(200, r#"{"data":"collection"}"#);
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &WIDGETS);

    for (operation, value) in [("retrieve", "."), ("delete", ".."), ("update", "..")] {
        let error = widgets
            .operation(operation)
            .unwrap()
            .call(&[value], None)
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidRequest, "{operation} {value}");
        assert_eq!(error.details().and_then(|d| d.param.as_deref()), Some("id"));
    }
    assert_eq!(transport.call_count(), 0);

    widgets
        .operation("retrieve")
        .unwrap()
        .call(&["..hidden"], None)
        .await
        .unwrap();
    assert_eq!(transport.last_request().path, "/api/beta1/widgets/..hidden");
}

#[tokio::test]
async fn test_update_defaults_to_form_body() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &WIDGETS);

    widgets
        .operation("update")
        .unwrap()
        .call(&["9"], params(json!({"name": "Gear & Co"})))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.path, "/api/beta1/widgets/9");
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body.as_deref(), Some("name=Gear%20%26%20Co"));
}

#[tokio::test]
async fn test_request_data_processor_replaces_encoding() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let widgets = Resource::new(Arc::clone(client.context()), &JSON_WIDGETS);

    widgets
        .operation("update")
        .unwrap()
        .call(&["9"], params(json!({"name": "Gear"})))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.body.as_deref(), Some(r#"{"name":"Gear"}"#));
}

#[tokio::test]
async fn test_create_with_empty_params_is_rejected_before_dispatch() {
    let transport = RecordingTransport::respond(200, "{}");
    let client = client(transport.clone());
    let boards = Resource::new(Arc::clone(client.context()), &BOARDS);

    let error = boards
        .operation("create")
        .unwrap()
        .call(&[], params(json!({})))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    assert_eq!(error.message(), "Missing required param: projectName");
    assert!(transport.requests().is_empty());
}
