//! End-to-end tests running directive-annotated fixtures through a configured chain.

use assert_json_diff::assert_json_eq;
use demock::filters::{DefaultDocumentFilter, MethodFilter};
use demock::transport::{DirectorySource, MockTransport, Outcome, Rejection};
use demock::{DemockConfig, DemockError, FilterChain, Request, Response};
use serde_json::{json, Value};

fn chain() -> FilterChain {
    FilterChain::from_config(&DemockConfig {
        default_document: Some("index.json".to_string()),
        ..Default::default()
    })
    .unwrap()
}

fn run(request: Request, fixture: Value) -> Response {
    let chain = chain();
    let request = chain.filter_request(request);
    chain.filter_response(&request, Response::ok(fixture)).unwrap()
}

// =============================================================================
// Request side
// =============================================================================

#[test]
fn test_get_request_passes_method_filter_untouched() {
    let chain = FilterChain::from_config(&DemockConfig::default()).unwrap();
    let request = Request::new("GET", "/api/test").with_param("a", 1);
    assert_eq!(chain.filter_request(request.clone()), request);
}

#[test]
fn test_default_document_with_and_without_trailing_slash() {
    let chain = chain();
    for url in ["/api/test", "/api/test/"] {
        let request = chain.filter_request(Request::new("GET", url));
        assert_eq!(request.url, "/api/test/index.json");
    }
}

#[test]
fn test_method_then_default_document_order() {
    let request = chain().filter_request(Request::new("POST", "/api/test"));
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/api/test/POST/index.json");
}

#[test]
fn test_default_document_then_method_order() {
    let mut chain = FilterChain::default();
    chain
        .register_request_filter("defaultDocument", DefaultDocumentFilter::new("index.json"))
        .unwrap()
        .register_request_filter("method", MethodFilter)
        .unwrap();

    let request = chain.filter_request(Request::new("POST", "/api/test"));
    assert_eq!(request.url, "/api/test/index.json/POST");
}

// =============================================================================
// Response side
// =============================================================================

#[test]
fn test_data_directive_replaces_payload() {
    let response = run(
        Request::new("GET", "/"),
        json!({ "$data": { "foo": "bar" } }),
    );
    assert_json_eq!(response.data.unwrap(), json!({ "foo": "bar" }));
}

#[test]
fn test_switch_cases() {
    let fixture = json!({
        "$switch": "username",
        "$case": { "joe": { "name": "Joe" } },
        "$default": { "name": "Unknown" }
    });

    let joe = run(
        Request::new("GET", "/").with_param("username", "joe"),
        fixture.clone(),
    );
    assert_eq!(joe.data.unwrap()["name"], "Joe");

    let jane = run(
        Request::new("GET", "/").with_param("username", "jane"),
        fixture,
    );
    assert_eq!(jane.data.unwrap()["name"], "Unknown");
}

#[test]
fn test_switch_without_default_keeps_directives() {
    let fixture = json!({
        "$switch": "username",
        "$case": { "joe": { "name": "Joe" } }
    });
    let response = run(
        Request::new("GET", "/").with_param("username", "jane"),
        fixture.clone(),
    );
    assert_json_eq!(response.data.unwrap(), fixture);
}

#[test]
fn test_nested_directives_inside_switch_case() {
    let fixture = json!({
        "$switch": "username",
        "$case": {
            "locked": {
                "$delay": 200,
                "$status": { "code": 423, "text": "Locked" },
                "$data": { "error": "account locked" }
            }
        }
    });
    let response = run(
        Request::new("GET", "/").with_param("username", "locked"),
        fixture,
    );
    assert_eq!(response.delay, Some(200));
    assert_eq!(response.status_code, 423);
    assert_eq!(response.status_text.as_deref(), Some("Locked"));
    assert_json_eq!(response.data.unwrap(), json!({ "error": "account locked" }));
}

#[test]
fn test_switch_invalidates_sibling_directives() {
    // status is registered before switch and still fires; arrayItem comes
    // after switch and no longer sees its key on the replaced payload.
    let fixture = json!({
        "$status": { "code": 202 },
        "$switch": "kind",
        "$case": { "list": { "items": [1, 2, 3] } },
        "$arrayPath": "items",
        "$arrayItem": 0,
        "items": ["x", "y"]
    });
    let response = run(
        Request::new("GET", "/").with_param("kind", "list"),
        fixture,
    );
    assert_eq!(response.status_code, 202);
    assert_json_eq!(response.data.unwrap(), json!({ "items": [1, 2, 3] }));
}

#[test]
fn test_array_pipeline_filter_sort_pick() {
    let fixture = json!({
        "$arrayPath": "result.users",
        "$arrayFilter": { "role": "=", "minAge": ">= age" },
        "$arraySort": true,
        "$arrayItem": 0,
        "result": {
            "users": [
                { "name": "ann", "role": "admin", "age": 31 },
                { "name": "Ben", "role": "admin", "age": 45 },
                { "name": "cy", "role": "user", "age": 52 },
                { "name": "dee", "role": "admin", "age": 19 }
            ]
        }
    });
    let request = Request::new("GET", "/api/users")
        .with_param("role", "admin")
        .with_param("minAge", "30")
        .with_param("sortKey", "name")
        .with_param("sortDir", "ASC");

    let data = run(request, fixture).data.unwrap();
    assert_json_eq!(
        data["result"]["users"].clone(),
        json!({ "name": "ann", "role": "admin", "age": 31 })
    );
}

#[test]
fn test_array_when_empty_fallback_runs_its_directives() {
    let fixture = json!({
        "$arrayPath": "items",
        "$arrayFilter": { "id": "=" },
        "$arrayWhenEmpty": {
            "$status": { "code": 404, "text": "Not Found" },
            "$data": { "error": "no such item" }
        },
        "items": [{ "id": 1 }, { "id": 2 }]
    });

    let found = run(Request::new("GET", "/").with_param("id", 2), fixture.clone());
    assert_eq!(found.status_code, 200);
    assert_eq!(found.data.unwrap()["items"], json!([{ "id": 2 }]));

    let missing = run(Request::new("GET", "/").with_param("id", 9), fixture);
    assert_eq!(missing.status_code, 404);
    assert_json_eq!(missing.data.unwrap(), json!({ "error": "no such item" }));
}

#[test]
fn test_array_filter_equality_on_id() {
    let fixture = json!({
        "$arrayPath": "items",
        "$arrayFilter": { "id": "=" },
        "items": [{ "id": 1 }, { "id": 11 }, { "id": "1" }]
    });
    let response = run(Request::new("GET", "/").with_param("id", "1"), fixture);
    assert_eq!(
        response.data.unwrap()["items"],
        json!([{ "id": 1 }, { "id": "1" }])
    );
}

#[test]
fn test_array_filter_equality_on_float_id() {
    let fixture = json!({
        "$arrayPath": "items",
        "$arrayFilter": { "id": "=" },
        "items": [{ "id": 1.0 }, { "id": 2 }]
    });
    let response = run(Request::new("GET", "/").with_param("id", "1"), fixture);
    assert_eq!(response.data.unwrap()["items"], json!([{ "id": 1.0 }]));
}

#[test]
fn test_malformed_comparator_surfaces_as_error() {
    let chain = chain();
    let request = chain.filter_request(Request::new("GET", "/"));
    let fixture = json!({ "$arrayPath": "items", "$arrayFilter": { "id": "==" }, "items": [] });
    let err = chain
        .filter_response(&request, Response::ok(fixture))
        .unwrap_err();
    assert!(matches!(err, DemockError::InvalidComparator { .. }));
}

#[test]
fn test_self_wrapping_fixture_hits_pass_limit() {
    let mut fixture = json!({ "done": true });
    for _ in 0..40 {
        fixture = json!({ "$data": fixture });
    }
    let chain = chain();
    let err = chain
        .filter_response(&Request::new("GET", "/"), Response::ok(fixture))
        .unwrap_err();
    assert!(matches!(err, DemockError::PassLimitExceeded { limit: 32 }));
}

#[test]
fn test_custom_prefix_config() {
    let chain = FilterChain::from_config(&DemockConfig {
        filter_prefix: "__".to_string(),
        ..Default::default()
    })
    .unwrap();
    let fixture = json!({ "__status": { "code": 500 }, "$status": { "code": 418 } });
    let response = chain
        .filter_response(&Request::new("GET", "/"), Response::ok(fixture))
        .unwrap();
    assert_eq!(response.status_code, 500);
}

// =============================================================================
// Adaptor round trip over a fixture directory
// =============================================================================

#[tokio::test]
async fn test_directory_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("api/session/DELETE")).unwrap();
    std::fs::write(
        dir.path().join("api/session/DELETE/index.json"),
        r#"{ "$timeout": true }"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("api/session/index.json"),
        r#"{ "$delay": 20, "token": "abc" }"#,
    )
    .unwrap();

    let transport = MockTransport::new(chain(), DirectorySource::new(dir.path()));

    let outcome = transport
        .call(Request::new("GET", "/api/session"))
        .await
        .unwrap();
    match outcome {
        Outcome::Resolved(settled) => {
            assert_eq!(settled.data.unwrap()["token"], "abc");
        }
        other => panic!("Expected resolved outcome, got {other:?}"),
    }

    let outcome = transport
        .call(Request::new("DELETE", "/api/session"))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Rejected(Rejection::Timeout));
}
