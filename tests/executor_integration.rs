//! Executor behavior against a live mock server: retry budgets, status
//! classification, and sentinel screening.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use breatheasy::{ApiError, ErrorKind, Outcome, RequestExecutor, RetryPolicy, Screening};

const SHORT_DELAY: Duration = Duration::from_millis(10);

fn accept_all(_: &Value) -> Screening {
    Screening::Accept
}

/// The executor is blocking, so drive it off the async test runtime.
async fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn executor() -> RequestExecutor {
    RequestExecutor::new("TestService", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_retries_recover_from_transient_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/data", server.uri());
    let result = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::new(2, SHORT_DELAY), accept_all)
    })
    .await;

    match result.unwrap() {
        Outcome::Success(body) => assert_eq!(body["value"], 7),
        Outcome::Empty => panic!("expected a payload"),
    }
}

#[tokio::test]
async fn test_exhausted_budget_surfaces_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::new(1, SHORT_DELAY), accept_all)
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerError);
    assert_eq!(err.status_code, Some(503));
}

#[tokio::test]
async fn test_fail_fast_policy_makes_a_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || executor().execute(&url, &[], RetryPolicy::none(), accept_all))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerError);
}

#[tokio::test]
async fn test_auth_failure_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::new(3, SHORT_DELAY), accept_all)
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AuthFailure);
}

#[tokio::test]
async fn test_not_found_and_rate_limit_are_terminal() {
    for (status, kind) in [(404, ErrorKind::NotFound), (429, ErrorKind::RateLimited)] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let url = server.uri();
        let err = run_blocking(move || {
            executor().execute(&url, &[], RetryPolicy::new(3, SHORT_DELAY), accept_all)
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind, kind, "status {status}");
    }
}

#[tokio::test]
async fn test_malformed_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::new(3, SHORT_DELAY), accept_all)
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Malformed);
}

#[tokio::test]
async fn test_timeout_consumes_the_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(2)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || {
        let executor = RequestExecutor::new("TestService", Duration::from_millis(100)).unwrap();
        executor.execute(&url, &[], RetryPolicy::new(1, SHORT_DELAY), accept_all)
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn test_screen_sentinel_maps_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "data": "Unknown station"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let outcome = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::none(), |body| {
            if body["data"] == "Unknown station" {
                Screening::Empty
            } else {
                Screening::Accept
            }
        })
    })
    .await
    .unwrap();

    assert_eq!(outcome, Outcome::Empty);
}

#[tokio::test]
async fn test_screen_rejection_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = run_blocking(move || {
        executor().execute(&url, &[], RetryPolicy::new(3, SHORT_DELAY), |_| {
            Screening::Reject(ApiError::unknown("TestService", "provider said no", None))
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.message, "provider said no");
}

#[tokio::test]
async fn test_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(wiremock::matchers::query_param("token", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let outcome = run_blocking(move || {
        executor().execute(
            &url,
            &[("token", "abc123".to_string())],
            RetryPolicy::none(),
            accept_all,
        )
    })
    .await
    .unwrap();

    assert!(matches!(outcome, Outcome::Success(_)));
}
