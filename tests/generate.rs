use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use serde_json::json;
use sow_architect::generate::{
    Attempt, GeminiTransport, GenerateError, RetryPolicy, Transport, extract_text, generate_with_retry,
    outcome_for,
};

/// Replays scripted outcomes and counts calls.
struct Scripted {
    outcomes: RefCell<VecDeque<Attempt>>,
    calls: RefCell<u32>,
}

impl Scripted {
    fn new(outcomes: Vec<Attempt>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            calls: RefCell::new(0),
        }
    }

    fn calls(&self) -> u32 {
        *self.calls.borrow()
    }
}

impl Transport for Scripted {
    fn attempt(&self, _prompt: &str) -> Attempt {
        *self.calls.borrow_mut() += 1;
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Attempt::Retryable("HTTP 503".into()))
    }
}

fn run(transport: &Scripted, policy: RetryPolicy) -> (Result<String, GenerateError>, Vec<Duration>) {
    let mut sleeps = Vec::new();
    let result = generate_with_retry(transport, &policy, |d| sleeps.push(d), "prompt");
    (result, sleeps)
}

#[test]
fn success_after_transient_failures() {
    let transport = Scripted::new(vec![
        Attempt::Retryable("HTTP 429".into()),
        Attempt::Retryable("HTTP 503".into()),
        Attempt::Success("1 TABLE OF CONTENTS".into()),
    ]);
    let (result, sleeps) = run(&transport, RetryPolicy::default());

    assert_eq!(result.unwrap(), "1 TABLE OF CONTENTS");
    assert_eq!(transport.calls(), 3);
    assert_eq!(sleeps, vec![Duration::from_secs(1), Duration::from_secs(2)]);
}

#[test]
fn exhausts_after_max_attempts_without_trailing_sleep() {
    let transport = Scripted::new(Vec::new());
    let (result, sleeps) = run(&transport, RetryPolicy::default());

    let err = result.unwrap_err();
    assert!(matches!(err, GenerateError::Exhausted { attempts: 5, .. }));
    assert_eq!(
        err.to_string(),
        "The model is currently overloaded after multiple retries. Please try again in a few moments."
    );
    assert_eq!(transport.calls(), 5);
    assert_eq!(
        sleeps,
        [1, 2, 4, 8].map(Duration::from_secs).to_vec()
    );
}

#[test]
fn permanent_failure_is_not_retried() {
    let transport = Scripted::new(vec![Attempt::Fatal(GenerateError::Permanent {
        status: 400,
        body: "bad key".into(),
    })]);
    let (result, sleeps) = run(&transport, RetryPolicy::default());

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "API Error 400: bad key");
    assert_eq!(transport.calls(), 1);
    assert!(sleeps.is_empty());
}

#[test]
fn custom_policy_scales_delays() {
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
    };
    assert_eq!(policy.delay_for(0), Duration::from_millis(10));
    assert_eq!(policy.delay_for(3), Duration::from_millis(80));

    let transport = Scripted::new(Vec::new());
    let (result, sleeps) = run(&transport, policy);
    assert!(result.is_err());
    assert_eq!(transport.calls(), 3);
    assert_eq!(sleeps, vec![Duration::from_millis(10), Duration::from_millis(20)]);
}

#[test]
fn extracts_joined_text_parts() {
    let response = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "1 TABLE OF CONTENTS" }, { "text": "2 PROJECT OVERVIEW" }] }
        }]
    });
    assert_eq!(
        extract_text(&response).unwrap(),
        "1 TABLE OF CONTENTS\n2 PROJECT OVERVIEW"
    );
}

#[test]
fn malformed_responses_keep_raw_payload() {
    let empty = json!({ "candidates": [] });
    match extract_text(&empty) {
        Err(GenerateError::Malformed { reason, raw }) => {
            assert_eq!(reason, "No candidates returned by Gemini");
            assert!(raw.contains("candidates"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let no_text = json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] });
    match extract_text(&no_text) {
        Err(GenerateError::Malformed { reason, .. }) => {
            assert_eq!(reason, "No text content returned by Gemini");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rate_limit_and_overload_statuses_are_retryable() {
    for status in [429, 503] {
        match outcome_for(status, "busy".into()) {
            Attempt::Retryable(msg) => assert_eq!(msg, format!("HTTP {status}")),
            other => panic!("{status}: {other:?}"),
        }
    }
}

#[test]
fn other_error_statuses_are_permanent_with_body() {
    for status in [400, 403, 500] {
        assert_eq!(
            outcome_for(status, "nope".into()),
            Attempt::Fatal(GenerateError::Permanent {
                status,
                body: "nope".into()
            })
        );
    }
}

#[test]
fn ok_status_with_html_body_keeps_raw_text() {
    let body = "<html>upstream proxy error</html>";
    match outcome_for(200, body.into()) {
        Attempt::Fatal(GenerateError::Malformed { reason, raw }) => {
            assert!(reason.starts_with("response is not JSON"), "{reason}");
            assert_eq!(raw, body);
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn ok_status_with_candidate_text_succeeds() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "1 TABLE OF CONTENTS" }] } }]
    })
    .to_string();
    assert_eq!(outcome_for(200, body), Attempt::Success("1 TABLE OF CONTENTS".into()));
}

#[test]
fn refused_connection_is_retryable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let transport = GeminiTransport::new(
        format!("http://127.0.0.1:{port}"),
        "gemini-test",
        "key",
        "system",
        Duration::from_secs(2),
    )
    .unwrap();
    assert!(matches!(transport.attempt("prompt"), Attempt::Retryable(_)));
}
