//! Tests for domain error construction, validation, and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no auth"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::business_rule_violation("cap"), ErrorCode::BusinessRuleViolation)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_with_camel_case_and_snake_case_codes(expected_trace_id: String) {
    let error = Error::business_rule_violation("cap reached")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "limit": 3 }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "business_rule_violation",
            "message": "cap reached",
            "traceId": expected_trace_id,
            "details": { "limit": 3 },
        })
    );
}

#[rstest]
fn deserialising_rejects_blank_trace_ids() {
    let payload = json!({ "code": "not_found", "message": "missing", "traceId": "  " });

    let result = serde_json::from_value::<Error>(payload);

    assert!(result.is_err());
}

#[rstest]
fn deserialising_accepts_snake_case_trace_alias(expected_trace_id: String) {
    let payload = json!({ "code": "conflict", "message": "taken", "trace_id": expected_trace_id });

    let error: Error = serde_json::from_value(payload).expect("alias accepted");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
